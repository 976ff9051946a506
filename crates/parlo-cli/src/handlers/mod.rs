//! Command handlers. Each submodule implements one subcommand.

pub mod serve;
pub mod speak;
pub mod tools;
pub mod voices;
