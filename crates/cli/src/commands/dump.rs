//! `dump`: print every effective property.

use std::collections::BTreeMap;

use anyhow::Result;
use confstack::{Environment, SourceKind};

use crate::formatters::{Formatter, PropertyEntry};

/// Effective properties sorted by key; the first source defining a key wins.
///
/// Sources backed by the process environment are skipped unless
/// `include_system_env` is set.
pub fn collect(environment: &Environment, include_system_env: bool) -> Vec<PropertyEntry> {
    let mut effective: BTreeMap<&str, (&str, &str)> = BTreeMap::new();
    for source in environment.property_sources().iter() {
        if source.kind() == SourceKind::SystemEnvironment && !include_system_env {
            continue;
        }
        for (key, value) in source.properties() {
            effective
                .entry(key.as_str())
                .or_insert((value.as_str(), source.name()));
        }
    }
    effective
        .into_iter()
        .map(|(key, (raw, source))| PropertyEntry {
            key: key.to_string(),
            value: environment.resolve_placeholders(raw),
            source: source.to_string(),
        })
        .collect()
}

pub fn run(
    environment: &Environment,
    include_system_env: bool,
    formatter: &dyn Formatter,
) -> Result<()> {
    let output = formatter.format_properties(&collect(environment, include_system_env))?;
    println!("{output}");
    Ok(())
}
