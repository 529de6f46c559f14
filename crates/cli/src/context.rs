//! Environment construction and resolution for CLI commands.
//!
//! Responsibilities:
//! - Load `.env` before argument parsing (gated by `DOTENV_DISABLED`).
//! - Turn CLI flags into an `Environment` and a configured `ConfigFileProcessor`.
//! - Run both lifecycle hooks so commands see the final environment.
//!
//! Does NOT handle:
//! - Output formatting (see `formatters`).
//!
//! Invariants:
//! - Source precedence is command line, process environment, config files, `--default` values.
//! - `--profile` values become an `app.profiles.active` command-line property.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use confstack::constants::ACTIVE_PROFILES_PROPERTY;
use confstack::{ConfigFileProcessor, Environment, FileSystemResourceLoader};

use crate::args::Cli;

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from `.env` if present.
///
/// A missing file is not an error. Setting `DOTENV_DISABLED` to `true` or `1`
/// skips loading entirely (useful for testing).
pub fn load_dotenv() -> Result<()> {
    if dotenv_disabled() {
        return Ok(());
    }
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenvy::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to parse .env file"),
    }
}

/// Command-line style arguments derived from `--set` and `--profile`.
pub fn command_line_args(cli: &Cli) -> Vec<String> {
    let mut args: Vec<String> = cli
        .properties
        .iter()
        .map(|(key, value)| format!("--{key}={value}"))
        .collect();
    if !cli.profiles.is_empty() {
        args.push(format!(
            "--{ACTIVE_PROFILES_PROPERTY}={}",
            cli.profiles.join(",")
        ));
    }
    args
}

/// Build the environment described by `cli` and resolve its configuration files.
pub fn resolve_environment(cli: &Cli) -> Result<Environment> {
    let resources = cli.classpath.iter().fold(
        FileSystemResourceLoader::new(&cli.dir),
        |resources, root| resources.with_classpath_root(root),
    );
    let mut processor = ConfigFileProcessor::new(resources);
    if let Some(locations) = &cli.search_locations {
        processor = processor.with_search_locations(locations)?;
    }
    if let Some(names) = &cli.search_names {
        processor = processor.with_search_names(names)?;
    }

    let mut environment = Environment::new().with_command_line_args(command_line_args(cli));
    if !cli.no_system_env {
        environment = environment.with_process_environment();
    }
    if !cli.defaults.is_empty() {
        let defaults: BTreeMap<String, String> = cli.defaults.iter().cloned().collect();
        environment = environment.with_default_properties(defaults);
    }

    processor
        .post_process_environment(&mut environment)
        .with_context(|| format!("Failed to resolve configuration in {}", cli.dir.display()))?;
    processor.on_application_prepared(&mut environment);
    tracing::debug!(
        sources = environment.property_sources().len(),
        "Environment ready"
    );
    Ok(environment)
}
