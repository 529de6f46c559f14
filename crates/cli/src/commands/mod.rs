//! CLI command implementations.
//!
//! Each command builds a serializable view of the resolved environment and
//! hands it to the selected formatter.

pub mod dump;
pub mod get;
pub mod profiles;
pub mod sources;
