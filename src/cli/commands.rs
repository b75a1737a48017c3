//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Introspection-driven API client generator
#[derive(Parser, Debug)]
#[command(name = "introgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the server to introspect
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Literal Authorization header value, e.g. "Basic YWRtaW46YWRtaW4="
    #[arg(long, global = true)]
    pub auth: Option<String>,

    /// Generator configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override rules file (YAML)
    #[arg(long, global = true)]
    pub overrides: Option<PathBuf>,

    /// Generate code for internal actions as well
    #[arg(long, global = true)]
    pub internal: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the client module tree
    Generate {
        /// Output directory for the generated modules
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated package
        #[arg(long)]
        package: Option<String>,

        /// Additional endpoints to skip (repeatable)
        #[arg(long)]
        skip: Vec<String>,
    },

    /// List services and actions exposed by the server
    List,

    /// Print the inferred schema for one action's response example
    Schema {
        /// Endpoint key, e.g. "projects"
        endpoint: String,

        /// Action key, e.g. "search"
        action: String,
    },
}
