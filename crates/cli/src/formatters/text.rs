//! Plain text formatter implementation.
//!
//! Responsibilities:
//! - Format command output for terminals and shell pipelines.
//!
//! Does NOT handle:
//! - Other output formats.
//!
//! Invariants:
//! - `format_property` prints the bare value so `$(confstack get key)` works.
//! - Property listings use `key=value` lines.

use anyhow::Result;

use crate::formatters::{Formatter, ProfilesOutput, PropertyEntry, SourceSummary};

/// Text formatter.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_sources(&self, sources: &[SourceSummary]) -> Result<String> {
        if sources.is_empty() {
            return Ok("No property sources found.".to_string());
        }
        let lines: Vec<String> = sources
            .iter()
            .map(|s| format!("{}\t{}", s.name, s.properties))
            .collect();
        Ok(lines.join("\n"))
    }

    fn format_profiles(&self, profiles: &ProfilesOutput) -> Result<String> {
        if profiles.active.is_empty() {
            return Ok(format!(
                "No active profiles, falling back to default profiles: {}",
                profiles.default.join(", ")
            ));
        }
        Ok(profiles.active.join("\n"))
    }

    fn format_property(&self, property: &PropertyEntry) -> Result<String> {
        Ok(property.value.clone())
    }

    fn format_properties(&self, properties: &[PropertyEntry]) -> Result<String> {
        if properties.is_empty() {
            return Ok("No properties found.".to_string());
        }
        let lines: Vec<String> = properties
            .iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect();
        Ok(lines.join("\n"))
    }
}
