//! Command dispatch logic.
//!
//! Responsibilities:
//! - Resolve the environment once for the parsed CLI arguments.
//! - Route the subcommand to its handler with the selected formatter.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Environment construction (see `context` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::context::resolve_environment;
use crate::formatters::{OutputFormat, get_formatter};

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    // Validate the format before doing any work.
    let formatter = get_formatter(OutputFormat::from_str(&cli.format)?);
    let environment = resolve_environment(&cli)?;

    match &cli.command {
        Commands::Sources => commands::sources::run(&environment, formatter.as_ref()),
        Commands::Profiles => commands::profiles::run(&environment, formatter.as_ref()),
        Commands::Get { key } => commands::get::run(&environment, key, formatter.as_ref()),
        Commands::Dump { include_system_env } => {
            commands::dump::run(&environment, *include_system_env, formatter.as_ref())
        }
    }
}
