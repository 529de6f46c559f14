//! Tests for the configuration-file resolution engine.
//!
//! Responsibilities:
//! - Exercise full runs of `ConfigFileProcessor` against in-memory resources.
//! - Cover profile activation, includes, precedence, search space and failures.
//!
//! Does NOT handle:
//! - Parser details (tested in `sources`).
//! - File system resources (tested in `resource` and the integration tests).
//!
//! Invariants:
//! - Tests only use `MemoryResourceLoader`, so they never touch the process cwd.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::environment::Environment;
use crate::loader::ConfigFileProcessor;
use crate::resource::MemoryResourceLoader;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Processor over in-memory files keyed by location.
pub fn processor(files: &[(&str, &str)]) -> ConfigFileProcessor {
    let resources = files
        .iter()
        .fold(MemoryResourceLoader::new(), |loader, (location, content)| {
            loader.with_file(location, *content)
        });
    ConfigFileProcessor::new(resources)
}

/// Run both lifecycle hooks and return the environment.
pub fn resolve(processor: &mut ConfigFileProcessor, mut environment: Environment) -> Environment {
    processor
        .post_process_environment(&mut environment)
        .expect("resolution should succeed");
    processor.on_application_prepared(&mut environment);
    environment
}

pub fn source_names(environment: &Environment) -> Vec<String> {
    environment
        .property_sources()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn config_source(location: &str) -> String {
    format!("applicationConfig: [{location}]")
}

pub fn defaults(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
