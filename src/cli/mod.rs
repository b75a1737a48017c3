//! CLI module
//!
//! Command-line interface for the generator.
//!
//! # Commands
//!
//! - `generate` - Generate the client module tree
//! - `list` - List services and actions exposed by the server
//! - `schema` - Print the inferred schema for one action

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
