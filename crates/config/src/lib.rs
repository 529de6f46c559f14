//! Profile-aware configuration-file resolution.
//!
//! This crate discovers `application[-<profile>].{properties,yml,yaml}` files
//! across a set of search locations, selects the documents that apply to the
//! active profiles and merges them into an ordered [`Environment`].

pub mod constants;
pub mod environment;
mod loader;
pub mod resource;
pub mod sources;
pub mod types;

pub use environment::{Environment, ProfileExpressionError, env_var_or_none};
pub use loader::{
    ConfigError, ConfigFileProcessor, DeferredLog, DocumentCache, DocumentFilter, FilterKind,
    LoadError, LogEntry, SearchSpace, clean_path,
};
pub use resource::{
    FileResource, FileSystemResourceLoader, MemoryResourceLoader, Resource, ResourceLoader,
};
pub use sources::{PropertiesLoader, PropertySourceLoader, YamlLoader, default_loaders};
pub use types::{Document, Profile, PropertySource, PropertySources, SourceKind};
