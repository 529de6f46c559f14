//! Parsers that turn resources into property sources.
//!
//! Responsibilities:
//! - Define the `PropertySourceLoader` seam (extensions + parse).
//! - Provide the built-in `.properties` and YAML loaders, in registration order.
//!
//! Does NOT handle:
//! - Deciding which files to parse or how documents are filtered (see `loader`).
//!
//! Invariants:
//! - `id()` is unique per loader and stable; it keys the document cache.
//! - A resource with no content produces an empty list, never an error.

mod properties;
mod yaml;

pub use properties::{PropertiesLoader, parse_properties};
pub use yaml::{YamlLoader, flatten_yaml};

use crate::loader::LoadError;
use crate::resource::Resource;
use crate::types::PropertySource;

/// Parses a resource into zero or more raw property sources.
pub trait PropertySourceLoader: std::fmt::Debug {
    /// Stable identifier used as part of the document cache key.
    fn id(&self) -> &str;

    /// Supported extensions without the leading dot, in preference order.
    fn file_extensions(&self) -> &[&str];

    /// Parse `resource`, naming the resulting sources after `name`.
    fn load(&self, name: &str, resource: &dyn Resource) -> Result<Vec<PropertySource>, LoadError>;

    /// Whether `location` ends with one of this loader's extensions (case-insensitive).
    fn can_load(&self, location: &str) -> bool {
        let location = location.to_ascii_lowercase();
        self.file_extensions()
            .iter()
            .any(|extension| location.ends_with(&extension.to_ascii_lowercase()))
    }
}

/// The built-in loaders: properties first, then YAML.
pub fn default_loaders() -> Vec<Box<dyn PropertySourceLoader>> {
    vec![Box::new(PropertiesLoader), Box::new(YamlLoader)]
}
