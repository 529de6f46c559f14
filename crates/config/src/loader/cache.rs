//! Memoized parse results.
//!
//! Responsibilities:
//! - Remember the property sources parsed from a resource by a given loader.
//!
//! Does NOT handle:
//! - Binding profile directives; documents are rebuilt against each run's
//!   environment (see `resolver`).
//!
//! Invariants:
//! - Keyed by `(loader id, resource uri)`; one loader never sees another's results.
//! - Entries are never evicted; the cache lives as long as its processor.
//! - Failed parses are not cached.

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::PropertySource;

/// Parsed property sources keyed by loader and resource identity.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: HashMap<(String, String), Arc<Vec<PropertySource>>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, loader_id: &str, uri: &str) -> Option<Arc<Vec<PropertySource>>> {
        self.entries
            .get(&(loader_id.to_string(), uri.to_string()))
            .cloned()
    }

    /// Return the cached sources, parsing with `load` on a miss.
    pub fn get_or_try_insert<E>(
        &mut self,
        loader_id: &str,
        uri: &str,
        load: impl FnOnce() -> Result<Vec<PropertySource>, E>,
    ) -> Result<Arc<Vec<PropertySource>>, E> {
        let key = (loader_id.to_string(), uri.to_string());
        if let Some(sources) = self.entries.get(&key) {
            return Ok(Arc::clone(sources));
        }
        let sources = Arc::new(load()?);
        self.entries.insert(key, Arc::clone(&sources));
        Ok(sources)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
