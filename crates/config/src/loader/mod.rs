//! Configuration-file resolution engine.
//!
//! Responsibilities:
//! - Resolve the search space and probe `<location><name>[-<profile>].<ext>` files.
//! - Drive the profile queue until every active and included profile is loaded.
//! - Merge the loaded sources into the environment and commit the active profiles.
//!
//! Does NOT handle:
//! - Parsing file formats (see `sources`).
//! - Locating resources on disk or in memory (see `resource`).
//!
//! Invariants / Assumptions:
//! - Later-processed profiles take precedence over earlier ones, the base last.
//! - The first explicit active directive wins; later ones are logged and ignored.
//! - Missing files are never errors; malformed ones always are.

mod cache;
mod deferred_log;
mod error;
mod filter;
mod merge;
mod processor;
mod reconcile;
mod resolver;
mod search;

pub use cache::DocumentCache;
pub use deferred_log::{DeferredLog, LogEntry};
pub use error::{ConfigError, LoadError};
pub use filter::{DocumentFilter, FilterKind};
pub use processor::ConfigFileProcessor;
pub use search::{SearchSpace, clean_path};

#[cfg(test)]
mod tests;
