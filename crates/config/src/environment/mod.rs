//! The environment a resolution run reads from and writes into.
//!
//! Responsibilities:
//! - Own the ordered property sources and resolve properties across them.
//! - Track active and default profiles, falling back to the directive properties.
//! - Decide whether a set of profile expressions is accepted.
//!
//! Does NOT handle:
//! - Discovering or loading configuration files (see `loader` module).
//!
//! Invariants:
//! - Earlier property sources win over later ones.
//! - When no profile was set explicitly, active profiles come from `app.profiles.active`.
//! - When no profile is active, the default profiles are treated as active.

mod env;
mod placeholders;
mod profiles_expr;

use std::collections::BTreeMap;

pub use env::{command_line_source, env_var_or_none, process_environment_source};
pub use placeholders::resolve_placeholders;
pub use profiles_expr::{ProfileExpr, ProfileExpressionError, Profiles};

use crate::constants::{
    ACTIVE_PROFILES_PROPERTY, DEFAULT_PROFILES_PROPERTY, DEFAULT_PROPERTIES,
    RESERVED_DEFAULT_PROFILE, SYSTEM_ENVIRONMENT_PROPERTIES,
};
use crate::types::{PropertySource, PropertySources};

/// Property sources plus profile state.
#[derive(Debug, Clone)]
pub struct Environment {
    property_sources: PropertySources,
    active_profiles: Vec<String>,
    default_profiles: Vec<String>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment with no sources and the reserved `default` profile.
    pub fn new() -> Self {
        Self {
            property_sources: PropertySources::new(),
            active_profiles: Vec::new(),
            default_profiles: vec![RESERVED_DEFAULT_PROFILE.to_string()],
        }
    }

    /// Add `--key=value` arguments as the highest-precedence source.
    pub fn with_command_line_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.property_sources.add_first(command_line_source(args));
        self
    }

    /// Add environment variables as a relaxed-lookup source.
    pub fn with_system_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.add_before_anchor(PropertySource::system_environment(
            SYSTEM_ENVIRONMENT_PROPERTIES,
            vars,
        ));
        self
    }

    /// Add the current process environment as a relaxed-lookup source.
    pub fn with_process_environment(mut self) -> Self {
        self.add_before_anchor(process_environment_source());
        self
    }

    /// Install the low-priority anchor source.
    pub fn with_default_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.property_sources
            .add_last(PropertySource::from_map(DEFAULT_PROPERTIES, properties));
        self
    }

    /// Add a source with lower precedence than everything but the anchor.
    pub fn with_property_source(mut self, source: PropertySource) -> Self {
        self.add_before_anchor(source);
        self
    }

    fn add_before_anchor(&mut self, source: PropertySource) {
        if !self.property_sources.contains(DEFAULT_PROPERTIES) || source.name() == DEFAULT_PROPERTIES {
            self.property_sources.add_last(source);
            return;
        }
        if let Err(err) = self.property_sources.add_before(DEFAULT_PROPERTIES, source) {
            tracing::warn!(error = %err, "Failed to add property source before defaultProperties");
        }
    }

    pub fn property_sources(&self) -> &PropertySources {
        &self.property_sources
    }

    pub fn property_sources_mut(&mut self) -> &mut PropertySources {
        &mut self.property_sources
    }

    pub fn contains_property(&self, key: &str) -> bool {
        self.property_sources.iter().any(|s| s.contains_property(key))
    }

    /// First raw value for `key`, without placeholder resolution.
    pub fn get_raw_property(&self, key: &str) -> Option<&str> {
        self.property_sources
            .iter()
            .find_map(|source| source.get_property(key))
    }

    /// First value for `key` with placeholders resolved.
    pub fn get_property(&self, key: &str) -> Option<String> {
        self.get_raw_property(key)
            .map(|raw| self.resolve_placeholders(raw))
    }

    /// Resolve `${...}` placeholders against this environment, leniently.
    pub fn resolve_placeholders(&self, text: &str) -> String {
        resolve_placeholders(text, &|key| self.get_raw_property(key).map(str::to_string))
    }

    /// Bind `key` as a string list from the first source that defines it.
    pub fn bind_string_list(&self, key: &str) -> Option<Vec<String>> {
        let resolve = |value: &str| self.resolve_placeholders(value);
        self.property_sources
            .iter()
            .find_map(|source| source.bind_string_list(key, &resolve))
    }

    /// Profiles explicitly active, or those named by `app.profiles.active`.
    pub fn active_profiles(&self) -> Vec<String> {
        if !self.active_profiles.is_empty() {
            return self.active_profiles.clone();
        }
        self.bind_string_list(ACTIVE_PROFILES_PROPERTY)
            .unwrap_or_default()
    }

    /// Profiles considered active when no other profile is.
    pub fn default_profiles(&self) -> Vec<String> {
        if self.default_profiles == [RESERVED_DEFAULT_PROFILE] {
            if let Some(names) = self.bind_string_list(DEFAULT_PROFILES_PROPERTY) {
                return names;
            }
        }
        self.default_profiles.clone()
    }

    /// Add `name` to the active profiles; no-op when already present.
    pub fn add_active_profile(&mut self, name: &str) {
        if self.active_profiles.is_empty() {
            self.active_profiles = self.active_profiles();
        }
        if !self.active_profiles.iter().any(|p| p == name) {
            self.active_profiles.push(name.to_string());
        }
    }

    /// Replace the active profiles, dropping duplicates.
    pub fn set_active_profiles<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_profiles.clear();
        for name in names {
            let name = name.into();
            if !self.active_profiles.contains(&name) {
                self.active_profiles.push(name);
            }
        }
    }

    pub fn set_default_profiles<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_profiles = names.into_iter().map(Into::into).collect();
    }

    pub fn is_profile_active(&self, name: &str) -> bool {
        let active = self.active_profiles();
        active.iter().any(|p| p == name)
            || (active.is_empty() && self.default_profiles().iter().any(|p| p == name))
    }

    /// Whether any of `expressions` matches the current profile state.
    pub fn accepts_profiles<S: AsRef<str>>(
        &self,
        expressions: &[S],
    ) -> Result<bool, ProfileExpressionError> {
        let profiles = Profiles::of(expressions)?;
        let active = self.active_profiles();
        let defaults = if active.is_empty() {
            self.default_profiles()
        } else {
            Vec::new()
        };
        Ok(profiles.matches(&|name| {
            active.iter().any(|p| p == name) || defaults.iter().any(|p| p == name)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_source_precedence() {
        let environment = Environment::new()
            .with_default_properties(defaults(&[("color", "grey"), ("size", "m")]))
            .with_system_environment([("COLOR", "green")])
            .with_command_line_args(["--color=red"]);

        assert_eq!(
            environment.property_sources().names(),
            vec!["commandLineArgs", "systemEnvironment", "defaultProperties"]
        );
        assert_eq!(environment.get_property("color"), Some("red".to_string()));
        assert_eq!(environment.get_property("size"), Some("m".to_string()));
        assert!(!environment.contains_property("weight"));
    }

    #[test]
    fn test_late_sources_stay_above_anchor() {
        let environment = Environment::new()
            .with_property_source(PropertySource::new("early"))
            .with_default_properties(defaults(&[("size", "m")]))
            .with_property_source(PropertySource::new("first"))
            .with_property_source(PropertySource::new("second"));

        assert_eq!(
            environment.property_sources().names(),
            vec!["early", "first", "second", "defaultProperties"]
        );
    }

    #[test]
    fn test_get_property_resolves_placeholders() {
        let environment = Environment::new()
            .with_command_line_args(["--host=example.org", "--url=https://${host}/${path:api}"]);
        assert_eq!(
            environment.get_property("url"),
            Some("https://example.org/api".to_string())
        );
    }

    #[test]
    fn test_active_profiles_fall_back_to_property() {
        let mut environment =
            Environment::new().with_command_line_args(["--app.profiles.active=a,b"]);
        assert_eq!(environment.active_profiles(), vec!["a", "b"]);

        environment.add_active_profile("c");
        environment.add_active_profile("a");
        assert_eq!(environment.active_profiles(), vec!["a", "b", "c"]);

        environment.set_active_profiles(["x", "x", "y"]);
        assert_eq!(environment.active_profiles(), vec!["x", "y"]);
    }

    #[test]
    fn test_default_profiles_property_overrides_reserved_default() {
        let mut environment =
            Environment::new().with_command_line_args(["--app.profiles.default=local"]);
        assert_eq!(environment.default_profiles(), vec!["local"]);

        environment.set_default_profiles(["custom"]);
        assert_eq!(environment.default_profiles(), vec!["custom"]);
    }

    #[test]
    fn test_accepts_profiles_uses_defaults_only_when_nothing_active() {
        let mut environment = Environment::new();
        assert!(environment.accepts_profiles(&["default"]).unwrap());
        assert!(environment.is_profile_active("default"));

        environment.add_active_profile("prod");
        assert!(!environment.accepts_profiles(&["default"]).unwrap());
        assert!(environment.accepts_profiles(&["prod & !dev"]).unwrap());
        assert!(environment.accepts_profiles(&["dev", "prod"]).unwrap());
    }

    #[test]
    fn test_accepts_profiles_rejects_malformed_expression() {
        let environment = Environment::new();
        assert!(environment.accepts_profiles(&["a & b | c"]).is_err());
    }

    #[test]
    fn test_bind_string_list_first_source_wins() {
        let environment = Environment::new()
            .with_default_properties(defaults(&[("app.profiles.include", "low")]))
            .with_command_line_args(["--app.profiles.include=high,${extra:more}"]);
        assert_eq!(
            environment.bind_string_list("app.profiles.include"),
            Some(vec!["high".to_string(), "more".to_string()])
        );
    }
}
