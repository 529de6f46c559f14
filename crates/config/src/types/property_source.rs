//! Named property sources and their ordered container.
//!
//! Responsibilities:
//! - Hold one flat key/value map under a stable, unique name.
//! - Provide relaxed lookups for sources backed by the process environment.
//! - Keep an ordered, name-addressed list of sources with relative insertion.
//!
//! Does NOT handle:
//! - Placeholder resolution (see `environment::placeholders`).
//! - Parsing files into sources (see `sources`).
//!
//! Invariants:
//! - A name appears at most once in a `PropertySources` list; re-adding moves it.
//! - Earlier entries in a `PropertySources` list take precedence over later ones.
//! - List values are stored flattened as `key[0]`, `key[1]`, ...

use std::collections::BTreeMap;

use serde::Serialize;

use crate::loader::ConfigError;

/// How keys are matched against a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Exact key lookups.
    #[default]
    Map,
    /// Relaxed lookups (`app.config-name` also matches `APP_CONFIG_NAME`).
    SystemEnvironment,
}

/// A named set of flattened properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySource {
    name: String,
    kind: SourceKind,
    properties: BTreeMap<String, String>,
}

impl PropertySource {
    /// Create an empty map-backed source.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_map(name, BTreeMap::new())
    }

    pub fn from_map(name: impl Into<String>, properties: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Map,
            properties,
        }
    }

    /// Create a source over environment variables with relaxed key matching.
    pub fn system_environment<I, K, V>(name: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            kind: SourceKind::SystemEnvironment,
            properties: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Builder-style insert.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Look up a raw (unresolved) value.
    pub fn get_property(&self, key: &str) -> Option<&str> {
        match self.kind {
            SourceKind::Map => self.properties.get(key).map(String::as_str),
            SourceKind::SystemEnvironment => relaxed_names(key)
                .iter()
                .find_map(|candidate| self.properties.get(candidate))
                .map(String::as_str),
        }
    }

    pub fn contains_property(&self, key: &str) -> bool {
        self.get_property(key).is_some()
    }

    /// Copy of this source, same name, with the given keys hidden.
    pub fn without_keys(&self, hidden: &[&str]) -> Self {
        let properties = self
            .properties
            .iter()
            .filter(|(key, _)| !hidden.iter().any(|h| relaxed_names(h).contains(key)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self {
            name: self.name.clone(),
            kind: self.kind,
            properties,
        }
    }

    /// Bind `key` as a list of strings.
    ///
    /// A plain value is placeholder-resolved and then split on commas; indexed
    /// values (`key[0]`, `key[1]`, ...) are resolved one by one. Elements are
    /// trimmed and empty ones dropped. Returns `None` when the key is absent.
    pub fn bind_string_list(
        &self,
        key: &str,
        resolve: &dyn Fn(&str) -> String,
    ) -> Option<Vec<String>> {
        if let Some(raw) = self.get_property(key) {
            return Some(split_comma_delimited(&resolve(raw)));
        }
        let mut values = Vec::new();
        while let Some(raw) = self.get_property(&format!("{key}[{}]", values.len())) {
            values.push(resolve(raw));
        }
        if values.is_empty() {
            return None;
        }
        Some(
            values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect(),
        )
    }
}

/// Split a comma-delimited value into trimmed, non-empty elements.
pub fn split_comma_delimited(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Candidate environment variable names for a property key.
fn relaxed_names(key: &str) -> Vec<String> {
    let underscored_dots = key.replace('.', "_");
    let underscored_dashes = key.replace('-', "_");
    let underscored_both = underscored_dots.replace('-', "_");
    let mut names = vec![key.to_string()];
    for candidate in [underscored_dots, underscored_dashes, underscored_both] {
        if !names.contains(&candidate) {
            names.push(candidate);
        }
    }
    let upper: Vec<String> = names.iter().map(|n| n.to_uppercase()).collect();
    for candidate in upper {
        if !names.contains(&candidate) {
            names.push(candidate);
        }
    }
    names
}

/// Ordered, name-addressed list of property sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertySources {
    sources: Vec<PropertySource>,
}

impl PropertySources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertySource> {
        self.sources.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(PropertySource::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&PropertySource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Add with highest precedence.
    pub fn add_first(&mut self, source: PropertySource) {
        self.remove(&source.name);
        self.sources.insert(0, source);
    }

    /// Add with lowest precedence.
    pub fn add_last(&mut self, source: PropertySource) {
        self.remove(&source.name);
        self.sources.push(source);
    }

    /// Add immediately before (higher precedence than) `relative`.
    pub fn add_before(&mut self, relative: &str, source: PropertySource) -> Result<(), ConfigError> {
        self.insert_relative(relative, source, 0)
    }

    /// Add immediately after (lower precedence than) `relative`.
    pub fn add_after(&mut self, relative: &str, source: PropertySource) -> Result<(), ConfigError> {
        self.insert_relative(relative, source, 1)
    }

    fn insert_relative(
        &mut self,
        relative: &str,
        source: PropertySource,
        offset: usize,
    ) -> Result<(), ConfigError> {
        if relative == source.name {
            return Err(ConfigError::InvalidValue {
                var: relative.to_string(),
                message: "a property source cannot be added relative to itself".to_string(),
            });
        }
        if !self.contains(relative) {
            return Err(ConfigError::UnknownPropertySource(relative.to_string()));
        }
        self.remove(&source.name);
        let index = self
            .position(relative)
            .ok_or_else(|| ConfigError::UnknownPropertySource(relative.to_string()))?;
        self.sources.insert(index + offset, source);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertySource> {
        self.position(name).map(|index| self.sources.remove(index))
    }

    /// Swap the source named `name` for `source`, keeping its position.
    pub fn replace(&mut self, name: &str, source: PropertySource) -> Result<(), ConfigError> {
        let index = self
            .position(name)
            .ok_or_else(|| ConfigError::UnknownPropertySource(name.to_string()))?;
        self.sources[index] = source;
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|s| s.name == name)
    }
}

impl<'a> IntoIterator for &'a PropertySources {
    type Item = &'a PropertySource;
    type IntoIter = std::slice::Iter<'a, PropertySource>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}
