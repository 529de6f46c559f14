//! YAML formatter implementation.
//!
//! Responsibilities:
//! - Format all command output as YAML.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;

use crate::formatters::{Formatter, ProfilesOutput, PropertyEntry, SourceSummary};

/// YAML formatter.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_sources(&self, sources: &[SourceSummary]) -> Result<String> {
        Ok(serde_yaml::to_string(sources)?)
    }

    fn format_profiles(&self, profiles: &ProfilesOutput) -> Result<String> {
        Ok(serde_yaml::to_string(profiles)?)
    }

    fn format_property(&self, property: &PropertyEntry) -> Result<String> {
        Ok(serde_yaml::to_string(property)?)
    }

    fn format_properties(&self, properties: &[PropertyEntry]) -> Result<String> {
        Ok(serde_yaml::to_string(properties)?)
    }
}
