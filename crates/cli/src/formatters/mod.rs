//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide multiple output formats: text, JSON and YAML.
//! - Define the serializable views commands hand to formatters.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//! - Collecting the data (see `commands`).
//!
//! Invariants:
//! - Machine-readable formats produce valid output for empty results (`[]`).
//! - Text output gives a human message for empty results.

use anyhow::Result;
use serde::Serialize;

mod json;
mod text;
mod yaml;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use yaml::YamlFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: text, json, yaml",
                s
            ),
        }
    }
}

/// One property source as listed by `sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub kind: confstack::SourceKind,
    pub properties: usize,
}

/// Active and default profiles as shown by `profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilesOutput {
    pub active: Vec<String>,
    pub default: Vec<String>,
}

/// A resolved property and the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}

/// Trait for formatting command output.
pub trait Formatter {
    /// Format the property sources in precedence order.
    fn format_sources(&self, sources: &[SourceSummary]) -> Result<String>;

    /// Format the profile state.
    fn format_profiles(&self, profiles: &ProfilesOutput) -> Result<String>;

    /// Format a single resolved property.
    fn format_property(&self, property: &PropertyEntry) -> Result<String>;

    /// Format every effective property.
    fn format_properties(&self, properties: &[PropertyEntry]) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
    }
}
