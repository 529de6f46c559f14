//! One parsed configuration unit and its profile metadata.
//!
//! Responsibilities:
//! - Pair a parsed property source with the profiles it declares.
//! - Extract the active/include directives the source carries.
//!
//! Invariants:
//! - Documents are immutable after creation.
//! - An empty `profiles` list marks a base document that applies when no profile is selected.

use crate::constants::{ACTIVE_PROFILES_PROPERTY, INCLUDE_PROFILES_PROPERTY, PROFILES_PROPERTY};
use crate::environment::Environment;
use crate::types::profile::{Profile, profile_set};
use crate::types::property_source::PropertySource;

/// A single document loaded by a property source loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    property_source: PropertySource,
    profiles: Vec<String>,
    active_profiles: Vec<Profile>,
    include_profiles: Vec<Profile>,
}

impl Document {
    pub fn new(
        property_source: PropertySource,
        profiles: Vec<String>,
        active_profiles: Vec<Profile>,
        include_profiles: Vec<Profile>,
    ) -> Self {
        Self {
            property_source,
            profiles,
            active_profiles,
            include_profiles,
        }
    }

    /// Build a document by binding the profile directives of `property_source`.
    ///
    /// Placeholders in directive values are resolved against `environment`.
    pub fn from_property_source(property_source: PropertySource, environment: &Environment) -> Self {
        let resolve = |value: &str| environment.resolve_placeholders(value);
        let bind = |key: &str| {
            property_source
                .bind_string_list(key, &resolve)
                .unwrap_or_default()
        };
        let profiles = bind(PROFILES_PROPERTY);
        let active_profiles = profile_set(bind(ACTIVE_PROFILES_PROPERTY));
        let include_profiles = profile_set(bind(INCLUDE_PROFILES_PROPERTY));
        Self::new(property_source, profiles, active_profiles, include_profiles)
    }

    pub fn property_source(&self) -> &PropertySource {
        &self.property_source
    }

    /// Profiles this document is restricted to; empty for base documents.
    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn active_profiles(&self) -> &[Profile] {
        &self.active_profiles
    }

    pub fn include_profiles(&self) -> &[Profile] {
        &self.include_profiles
    }
}
