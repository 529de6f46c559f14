//! Core value types for configuration resolution.
//!
//! Responsibilities:
//! - Define `Profile`, `PropertySource`, `PropertySources` and `Document`.
//!
//! Does NOT handle:
//! - Loading documents from resources (see `loader` module).
//! - Profile acceptance or placeholder resolution (see `environment` module).
//!
//! Invariants:
//! - Profiles compare by name only.
//! - Documents are immutable once built by the parse stage.

mod document;
mod profile;
mod property_source;

pub use document::Document;
pub use profile::Profile;
pub(crate) use profile::profile_set;
pub use property_source::{PropertySource, PropertySources, SourceKind, split_comma_delimited};
