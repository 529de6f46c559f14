//! Property sources backed by the process: environment variables and arguments.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Turn `--key=value` arguments into a property source.
//! - Snapshot the process environment into a relaxed-lookup property source.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Arguments that do not start with `--` are ignored.

use crate::constants::{COMMAND_LINE_PROPERTIES, SYSTEM_ENVIRONMENT_PROPERTIES};
use crate::types::PropertySource;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Build the `commandLineArgs` source from `--key=value` style arguments.
///
/// A bare `--flag` is recorded with an empty value. When the same key is
/// given more than once the values are joined with commas.
pub fn command_line_source<I, S>(args: I) -> PropertySource
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut source = PropertySource::new(COMMAND_LINE_PROPERTIES);
    for arg in args {
        let Some(option) = arg.as_ref().strip_prefix("--") else {
            continue;
        };
        let (key, value) = option.split_once('=').unwrap_or((option, ""));
        if key.is_empty() {
            continue;
        }
        let value = match source.get_property(key) {
            Some(existing) if !existing.is_empty() => format!("{existing},{value}"),
            _ => value.to_string(),
        };
        source.insert(key, value);
    }
    source
}

/// Snapshot the current process environment as the `systemEnvironment` source.
pub fn process_environment_source() -> PropertySource {
    PropertySource::system_environment(SYSTEM_ENVIRONMENT_PROPERTIES, std::env::vars())
}
