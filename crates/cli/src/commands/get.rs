//! `get`: print the resolved value of one property.

use anyhow::Result;
use confstack::Environment;

use crate::error::PropertyNotFound;
use crate::formatters::{Formatter, PropertyEntry};

/// Resolve `key`, naming the highest-precedence source that defines it.
pub fn lookup(environment: &Environment, key: &str) -> Option<PropertyEntry> {
    environment
        .property_sources()
        .iter()
        .find_map(|source| {
            source.get_property(key).map(|raw| PropertyEntry {
                key: key.to_string(),
                value: environment.resolve_placeholders(raw),
                source: source.name().to_string(),
            })
        })
}

pub fn run(environment: &Environment, key: &str, formatter: &dyn Formatter) -> Result<()> {
    let entry = lookup(environment, key).ok_or_else(|| PropertyNotFound(key.to_string()))?;
    let output = formatter.format_property(&entry)?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_resolves_placeholders_and_names_source() {
        let environment = Environment::new()
            .with_command_line_args(["--greeting=hello ${name}"])
            .with_system_environment([("NAME", "world")]);
        let entry = lookup(&environment, "greeting").unwrap();
        assert_eq!(entry.value, "hello world");
        assert_eq!(entry.source, "commandLineArgs");

        let relaxed = lookup(&environment, "name").unwrap();
        assert_eq!(relaxed.source, "systemEnvironment");
    }

    #[test]
    fn test_missing_key() {
        let environment = Environment::new();
        assert!(lookup(&environment, "missing").is_none());
        assert!(run(&environment, "missing", &crate::formatters::TextFormatter).is_err());
    }
}
