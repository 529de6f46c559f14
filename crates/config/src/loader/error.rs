//! Error types for configuration-file resolution.
//!
//! Responsibilities:
//! - Define the fatal errors a resolution run can end with.
//! - Define the per-resource parse errors wrapped by `ConfigError::LoadFailed`.
//!
//! Does NOT handle:
//! - Missing files or unmatched documents; those are skipped and logged, never errors.
//!
//! Invariants:
//! - Every variant carries enough context (location, key, line) to locate the problem.
//! - Parse failures keep the underlying error reachable through `source()`.

use thiserror::Error;

use crate::environment::ProfileExpressionError;

/// Errors that abort a resolution run or a property-source mutation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "File extension of config file location '{location}' is not known to any PropertySourceLoader. If the location is meant to reference a directory, it must end in '/'"
    )]
    UnknownFileExtension { location: String },

    #[error("Failed to load property source from location '{location}'")]
    LoadFailed {
        location: String,
        #[source]
        source: LoadError,
    },

    #[error("Property source '{0}' does not exist")]
    UnknownPropertySource(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Errors raised while reading or interpreting a single resource.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid properties at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error(transparent)]
    ProfileExpression(#[from] ProfileExpressionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unknown_extension_message_mentions_directory_hint() {
        let err = ConfigError::UnknownFileExtension {
            location: "file:./custom.json".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'file:./custom.json'"));
        assert!(message.ends_with("it must end in '/'"));
    }

    #[test]
    fn test_load_failed_exposes_source() {
        let err = ConfigError::LoadFailed {
            location: "classpath:/application.properties".to_string(),
            source: LoadError::Properties {
                line: 3,
                message: "bad escape".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to load property source from location 'classpath:/application.properties'"
        );
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("invalid properties at line 3: bad escape"));
    }
}
