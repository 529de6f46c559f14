//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format all command output as pretty-printed JSON.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;

use crate::formatters::{Formatter, ProfilesOutput, PropertyEntry, SourceSummary};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_sources(&self, sources: &[SourceSummary]) -> Result<String> {
        Ok(serde_json::to_string_pretty(sources)?)
    }

    fn format_profiles(&self, profiles: &ProfilesOutput) -> Result<String> {
        Ok(serde_json::to_string_pretty(profiles)?)
    }

    fn format_property(&self, property: &PropertyEntry) -> Result<String> {
        Ok(serde_json::to_string_pretty(property)?)
    }

    fn format_properties(&self, properties: &[PropertyEntry]) -> Result<String> {
        Ok(serde_json::to_string_pretty(properties)?)
    }
}
