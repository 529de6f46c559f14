//! Merge loaded sources into the environment.
//!
//! Responsibilities:
//! - Flatten per-profile source groups into the environment's ordered list.
//!
//! Invariants:
//! - Groups are visited in reverse load order, so later profiles take precedence.
//! - The first placed source sits directly before `defaultProperties` (or last);
//!   every following source is chained directly after the previous one.
//! - A source name is placed at most once.

use std::collections::HashSet;

use super::error::ConfigError;
use super::resolver::LoadedSources;
use crate::constants::DEFAULT_PROPERTIES;
use crate::environment::Environment;

/// Insert every loaded source into `environment`.
pub fn add_loaded_property_sources(
    environment: &mut Environment,
    loaded: &LoadedSources,
) -> Result<(), ConfigError> {
    let destination = environment.property_sources_mut();
    let mut added: HashSet<&str> = HashSet::new();
    let mut last_added: Option<&str> = None;

    for (_, sources) in loaded.iter().rev() {
        for source in sources {
            if !added.insert(source.name()) {
                continue;
            }
            match last_added {
                Some(previous) => destination.add_after(previous, source.clone())?,
                None if destination.contains(DEFAULT_PROPERTIES) => {
                    destination.add_before(DEFAULT_PROPERTIES, source.clone())?
                }
                None => destination.add_last(source.clone()),
            }
            last_added = Some(source.name());
        }
    }
    Ok(())
}
