//! HTTP request handlers, grouped by API surface.

pub mod events;
pub mod speech;
pub mod tools;
