//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and `CONFSTACK_*` environment variables.
//! - Validate `key=value` pairs.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the environment (see `context` module).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "confstack")]
#[command(about = "Resolve profile-aware configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confstack --classpath resources --profile prod get color\n  confstack --set app.config.name=service sources\n  confstack --profile dev,local --format json dump\n  confstack profiles\n"
)]
pub struct Cli {
    /// Working directory that `file:` locations are resolved against
    #[arg(long, global = true, env = "CONFSTACK_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Directory searched for `classpath:` locations (repeatable, relative to --dir)
    #[arg(
        long,
        global = true,
        env = "CONFSTACK_CLASSPATH",
        value_delimiter = ',',
        value_name = "DIR"
    )]
    pub classpath: Vec<PathBuf>,

    /// Property passed as a command-line argument, e.g. `--set color=red`
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub properties: Vec<(String, String)>,

    /// Lowest-precedence default property, e.g. `--default color=grey`
    #[arg(long = "default", global = true, value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub defaults: Vec<(String, String)>,

    /// Profile to activate (repeatable or comma-separated)
    #[arg(
        short,
        long = "profile",
        global = true,
        env = "CONFSTACK_PROFILES",
        value_delimiter = ','
    )]
    pub profiles: Vec<String>,

    /// Replace the default search locations (comma-separated)
    #[arg(long, global = true, env = "CONFSTACK_SEARCH_LOCATIONS")]
    pub search_locations: Option<String>,

    /// Replace the default configuration file names (comma-separated)
    #[arg(long, global = true, env = "CONFSTACK_SEARCH_NAMES")]
    pub search_names: Option<String>,

    /// Do not read properties from the process environment
    #[arg(long, global = true)]
    pub no_system_env: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, global = true, env = "CONFSTACK_FORMAT", default_value = "text")]
    pub format: String,

    /// Log resolution decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List property sources in precedence order
    Sources,

    /// Show the active profiles (and the defaults if none is active)
    Profiles,

    /// Print the resolved value of a property
    Get {
        /// Property key, e.g. `server.port`
        key: String,
    },

    /// Print every effective property
    Dump {
        /// Also include properties read from the process environment
        #[arg(long)]
        include_system_env: bool,
    },
}

/// Parse `key=value`; the value may be empty, the key may not.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
