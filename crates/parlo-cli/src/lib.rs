#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Dependencies used only by the binary entry point
use dotenvy as _;
use tracing_subscriber as _;

pub mod commands;
pub mod config;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use commands::{Commands, ToolsCommand};
pub use config::load_settings;
pub use parser::Cli;
