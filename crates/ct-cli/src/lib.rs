//! Carbon tracker CLI library.
//!
//! This crate provides the CLI interface for the site carbon tracker.

mod cli;
pub mod commands;
mod config;
mod input;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use input::read_records;
