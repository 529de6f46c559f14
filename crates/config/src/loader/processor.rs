//! Lifecycle entry points for configuration-file resolution.
//!
//! Responsibilities:
//! - Hold the resource loader, parsers, search overrides, document cache and deferred log.
//! - Run one resolution per `post_process_environment` call and write its results back.
//! - Move the anchor source last and flush the deferred log once the host is ready.
//!
//! Does NOT handle:
//! - Building the environment from the command line or process (see `environment`).
//!
//! Invariants:
//! - While a run executes, the anchor source hides its active/include directives;
//!   the original anchor is restored whether the run succeeds or fails.
//! - The document cache is shared by every run of the same processor.

use super::cache::DocumentCache;
use super::deferred_log::DeferredLog;
use super::error::ConfigError;
use super::merge::add_loaded_property_sources;
use super::reconcile::apply_active_profiles;
use super::resolver::Resolution;
use super::search::SearchSpace;
use crate::constants::{DEFAULT_PROPERTIES, LOAD_FILTERED_PROPERTIES};
use crate::environment::Environment;
use crate::resource::ResourceLoader;
use crate::sources::{PropertySourceLoader, default_loaders};
use crate::types::PropertySource;

/// Discovers, filters and merges configuration files into an environment.
///
/// # Example
///
/// ```
/// use confstack::{ConfigFileProcessor, Environment, MemoryResourceLoader};
///
/// let resources = MemoryResourceLoader::new()
///     .with_file("classpath:/application.properties", "color=blue\n")
///     .with_file("classpath:/application-prod.properties", "color=red\n");
/// let mut processor = ConfigFileProcessor::new(resources);
/// let mut environment = Environment::new().with_command_line_args(["--app.profiles.active=prod"]);
///
/// processor.post_process_environment(&mut environment).unwrap();
/// processor.on_application_prepared(&mut environment);
///
/// assert_eq!(environment.get_property("color").as_deref(), Some("red"));
/// assert_eq!(environment.active_profiles(), vec!["prod"]);
/// ```
#[derive(Debug)]
pub struct ConfigFileProcessor {
    resource_loader: Box<dyn ResourceLoader>,
    loaders: Vec<Box<dyn PropertySourceLoader>>,
    search_locations: Option<String>,
    search_names: Option<String>,
    cache: DocumentCache,
    log: DeferredLog,
}

impl ConfigFileProcessor {
    /// Create a processor with the built-in `.properties` and YAML loaders.
    pub fn new(resource_loader: impl ResourceLoader + 'static) -> Self {
        Self {
            resource_loader: Box::new(resource_loader),
            loaders: default_loaders(),
            search_locations: None,
            search_names: None,
            cache: DocumentCache::new(),
            log: DeferredLog::new(),
        }
    }

    /// Replace the registered loaders; order decides extension precedence.
    pub fn with_loaders(mut self, loaders: Vec<Box<dyn PropertySourceLoader>>) -> Self {
        self.loaders = loaders;
        self
    }

    /// Replace the default search locations (comma-separated).
    pub fn with_search_locations(mut self, locations: &str) -> Result<Self, ConfigError> {
        self.search_locations = Some(non_empty("search locations", locations)?);
        Ok(self)
    }

    /// Replace the default search names (comma-separated).
    pub fn with_search_names(mut self, names: &str) -> Result<Self, ConfigError> {
        self.search_names = Some(non_empty("search names", names)?);
        Ok(self)
    }

    /// Run one resolution against `environment`.
    pub fn post_process_environment(
        &mut self,
        environment: &mut Environment,
    ) -> Result<(), ConfigError> {
        let anchor = environment
            .property_sources()
            .get(DEFAULT_PROPERTIES)
            .cloned();
        if let Some(anchor) = &anchor {
            environment
                .property_sources_mut()
                .replace(DEFAULT_PROPERTIES, anchor.without_keys(LOAD_FILTERED_PROPERTIES))?;
        }

        let result = self.load(environment, anchor.as_ref());

        if let Some(anchor) = anchor {
            restore_anchor(environment, anchor);
        }
        result
    }

    fn load(
        &mut self,
        environment: &mut Environment,
        anchor: Option<&PropertySource>,
    ) -> Result<(), ConfigError> {
        let search = SearchSpace::resolve(
            environment,
            self.search_locations.as_deref(),
            self.search_names.as_deref(),
        );
        let outcome = Resolution::new(
            environment,
            self.resource_loader.as_ref(),
            &self.loaders,
            &mut self.cache,
            &mut self.log,
            search,
        )
        .run()?;

        add_loaded_property_sources(environment, &outcome.loaded)?;
        apply_active_profiles(environment, anchor, &outcome.processed, outcome.activated);
        tracing::debug!(
            sources = outcome.loaded.len(),
            active = ?environment.active_profiles(),
            "Configuration files resolved"
        );
        Ok(())
    }

    /// Move `defaultProperties` last and replay the deferred log into `tracing`.
    pub fn on_application_prepared(&mut self, environment: &mut Environment) {
        self.log.switch_over();
        let sources = environment.property_sources_mut();
        if let Some(anchor) = sources.remove(DEFAULT_PROPERTIES) {
            sources.add_last(anchor);
        }
    }

    pub fn deferred_log(&self) -> &DeferredLog {
        &self.log
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }
}

fn non_empty(var: &str, value: &str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(value.to_string())
}

fn restore_anchor(environment: &mut Environment, anchor: PropertySource) {
    let sources = environment.property_sources_mut();
    if sources.contains(DEFAULT_PROPERTIES) {
        if let Err(err) = sources.replace(DEFAULT_PROPERTIES, anchor) {
            tracing::warn!(error = %err, "Failed to restore defaultProperties");
        }
    } else {
        sources.add_last(anchor);
    }
}
