//! Profile queue and resolution loop.
//!
//! Responsibilities:
//! - Seed the profile queue from the environment and its directive properties.
//! - Drain the queue, loading every candidate file for each profile.
//! - Harvest active/include directives from matched documents into the queue.
//! - Run the final base pass that picks up profile sections of base files.
//!
//! Does NOT handle:
//! - Writing loaded sources into the environment (see `merge`).
//! - Committing the final active profiles (see `reconcile`).
//!
//! Invariants:
//! - The base sentinel (`None`) is always queued first.
//! - A profile is processed at most once per run; queue insertions skip
//!   profiles already queued, processed or currently being processed.
//! - Once explicit activation happened, later active directives are ignored
//!   and no implicit default profile stays queued.

use std::collections::VecDeque;

use super::cache::DocumentCache;
use super::deferred_log::DeferredLog;
use super::error::{ConfigError, LoadError};
use super::filter::{DocumentFilter, FilterKind};
use super::reconcile::is_explicit;
use super::search::{SearchSpace, is_directory};
use crate::constants::{ACTIVE_PROFILES_PROPERTY, APPLICATION_CONFIG_PREFIX, INCLUDE_PROFILES_PROPERTY};
use crate::environment::Environment;
use crate::resource::{Resource, ResourceLoader};
use crate::sources::PropertySourceLoader;
use crate::types::{Document, Profile, PropertySource, PropertySources, profile_set};

/// Property sources loaded for one profile, in pass order.
pub type LoadedSources = Vec<(Option<Profile>, PropertySources)>;

/// How a matched document is added to its profile's sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Lowest precedence within the profile.
    Append,
    /// Highest precedence within the profile, unless any profile already holds the name.
    PrependIfAbsent,
}

/// What a finished run produced.
#[derive(Debug, Default)]
pub struct ResolutionOutcome {
    /// Sources per profile, in the order profiles were first loaded.
    pub loaded: LoadedSources,
    /// Every profile that went through the drain loop, in order.
    pub processed: Vec<Option<Profile>>,
    /// Whether an active directive was applied.
    pub activated: bool,
}

/// State of one resolution run.
pub struct Resolution<'a> {
    environment: &'a mut Environment,
    resources: &'a dyn ResourceLoader,
    loaders: &'a [Box<dyn PropertySourceLoader>],
    cache: &'a mut DocumentCache,
    log: &'a mut DeferredLog,
    search: SearchSpace,
    profiles: VecDeque<Option<Profile>>,
    current: Option<Option<Profile>>,
    processed: Vec<Option<Profile>>,
    activated: bool,
    loaded: LoadedSources,
}

impl<'a> Resolution<'a> {
    pub fn new(
        environment: &'a mut Environment,
        resources: &'a dyn ResourceLoader,
        loaders: &'a [Box<dyn PropertySourceLoader>],
        cache: &'a mut DocumentCache,
        log: &'a mut DeferredLog,
        search: SearchSpace,
    ) -> Self {
        Self {
            environment,
            resources,
            loaders,
            cache,
            log,
            search,
            profiles: VecDeque::new(),
            current: None,
            processed: Vec::new(),
            activated: false,
            loaded: Vec::new(),
        }
    }

    /// Seed the queue, drain it, then run the final base pass.
    pub fn run(mut self) -> Result<ResolutionOutcome, ConfigError> {
        self.initialize_profiles();
        while let Some(profile) = self.profiles.pop_front() {
            if let Some(explicit) = profile.as_ref().filter(|p| is_explicit(p)) {
                self.environment.add_active_profile(explicit.name());
            }
            self.current = Some(profile.clone());
            self.load(profile.as_ref(), FilterKind::Positive, Placement::Append)?;
            self.current = None;
            self.processed.push(profile);
        }
        self.load(None, FilterKind::Negative, Placement::PrependIfAbsent)?;

        Ok(ResolutionOutcome {
            loaded: self.loaded,
            processed: self.processed,
            activated: self.activated,
        })
    }

    fn initialize_profiles(&mut self) {
        self.profiles.push_back(None);
        let activated_via_property = self.profiles_from_environment(ACTIVE_PROFILES_PROPERTY);
        let included_via_property = self.profiles_from_environment(INCLUDE_PROFILES_PROPERTY);

        let other_active: Vec<Profile> = self
            .environment
            .active_profiles()
            .into_iter()
            .map(Profile::new)
            .filter(|p| !activated_via_property.contains(p) && !included_via_property.contains(p))
            .collect();
        for profile in other_active {
            self.enqueue(profile);
        }
        for profile in included_via_property {
            self.enqueue(profile);
        }
        self.add_active_profiles(&activated_via_property);

        if self.profiles.len() == 1 {
            for name in self.environment.default_profiles() {
                self.enqueue(Profile::implicit_default(name));
            }
        }
    }

    fn profiles_from_environment(&self, key: &str) -> Vec<Profile> {
        profile_set(self.environment.bind_string_list(key).unwrap_or_default())
    }

    fn is_known(&self, profile: &Profile) -> bool {
        let candidate = Some(profile.clone());
        self.profiles.contains(&candidate)
            || self.processed.contains(&candidate)
            || self.current.as_ref() == Some(&candidate)
    }

    fn enqueue(&mut self, profile: Profile) {
        if !self.is_known(&profile) {
            self.profiles.push_back(Some(profile));
        }
    }

    fn add_active_profiles(&mut self, profiles: &[Profile]) {
        if profiles.is_empty() {
            return;
        }
        if self.activated {
            self.log.debug(format!(
                "Profiles already activated, '[{}]' will not be applied",
                join_names(profiles, ", ")
            ));
            return;
        }
        self.remove_unprocessed_default_profiles();
        for profile in profiles {
            self.enqueue(profile.clone());
        }
        self.log.debug(format!(
            "Activated activeProfiles {}",
            join_names(profiles, ",")
        ));
        self.activated = true;
    }

    fn remove_unprocessed_default_profiles(&mut self) {
        self.profiles
            .retain(|p| !p.as_ref().is_some_and(Profile::is_default_profile));
    }

    fn add_included_profiles(&mut self, includes: &[Profile]) {
        if includes.is_empty() {
            return;
        }
        let existing = std::mem::take(&mut self.profiles);
        for profile in includes {
            self.enqueue(profile.clone());
        }
        for profile in existing {
            if !self.profiles.contains(&profile) {
                self.profiles.push_back(profile);
            }
        }
    }

    fn load(
        &mut self,
        profile: Option<&Profile>,
        kind: FilterKind,
        placement: Placement,
    ) -> Result<(), ConfigError> {
        let search = self.search.clone();
        for location in search.locations() {
            if is_directory(location) {
                for name in search.names() {
                    self.load_location(location, Some(name.as_str()), profile, kind, placement)?;
                }
            } else {
                self.load_location(location, None, profile, kind, placement)?;
            }
        }
        Ok(())
    }

    fn load_location(
        &mut self,
        location: &str,
        name: Option<&str>,
        profile: Option<&Profile>,
        kind: FilterKind,
        placement: Placement,
    ) -> Result<(), ConfigError> {
        let loaders = self.loaders;
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            let loader = loaders
                .iter()
                .find(|loader| loader.can_load(location))
                .ok_or_else(|| ConfigError::UnknownFileExtension {
                    location: location.to_string(),
                })?;
            let filter = kind.for_profile(profile);
            return self.load_resource(loader.as_ref(), location, profile, &filter, placement);
        };

        let prefix = format!("{location}{name}");
        let mut tried: Vec<&str> = Vec::new();
        for loader in loaders {
            for &extension in loader.file_extensions() {
                if tried.contains(&extension) {
                    continue;
                }
                tried.push(extension);
                self.load_for_file_extension(
                    loader.as_ref(),
                    &prefix,
                    extension,
                    profile,
                    kind,
                    placement,
                )?;
            }
        }
        Ok(())
    }

    fn load_for_file_extension(
        &mut self,
        loader: &dyn PropertySourceLoader,
        prefix: &str,
        extension: &str,
        profile: Option<&Profile>,
        kind: FilterKind,
        placement: Placement,
    ) -> Result<(), ConfigError> {
        let default_filter = kind.for_profile(None);
        let profile_filter = kind.for_profile(profile);
        if let Some(profile) = profile {
            let profile_specific = format!("{prefix}-{profile}.{extension}");
            self.load_resource(loader, &profile_specific, Some(profile), &default_filter, placement)?;
            self.load_resource(loader, &profile_specific, Some(profile), &profile_filter, placement)?;
            // Sections of earlier profile files that name this profile.
            let previous: Vec<Profile> = self.processed.iter().flatten().cloned().collect();
            for processed in previous {
                let previously_loaded = format!("{prefix}-{processed}.{extension}");
                self.load_resource(loader, &previously_loaded, Some(profile), &profile_filter, placement)?;
            }
        }
        self.load_resource(
            loader,
            &format!("{prefix}.{extension}"),
            profile,
            &profile_filter,
            placement,
        )
    }

    fn load_resource(
        &mut self,
        loader: &dyn PropertySourceLoader,
        location: &str,
        profile: Option<&Profile>,
        filter: &DocumentFilter,
        placement: Placement,
    ) -> Result<(), ConfigError> {
        let resource = match self.resources.get_resource(location) {
            Some(resource) if resource.exists() => resource,
            missing => {
                self.log.trace(describe(
                    "Skipped missing config ",
                    location,
                    missing.as_deref(),
                    profile,
                ));
                return Ok(());
            }
        };
        if resource.extension().is_none() {
            self.log.trace(describe(
                "Skipped empty config extension ",
                location,
                Some(resource.as_ref()),
                profile,
            ));
            return Ok(());
        }

        let failed = |source: LoadError| ConfigError::LoadFailed {
            location: location.to_string(),
            source,
        };
        let name = format!("{APPLICATION_CONFIG_PREFIX}[{location}]");
        let documents = self
            .load_documents(loader, &name, resource.as_ref())
            .map_err(failed)?;
        if documents.is_empty() {
            self.log.trace(describe(
                "Skipped unloaded config ",
                location,
                Some(resource.as_ref()),
                profile,
            ));
            return Ok(());
        }

        let mut matched: Vec<&Document> = Vec::new();
        for document in documents.iter() {
            let applies = filter
                .matches(document, &*self.environment)
                .map_err(|e| failed(e.into()))?;
            if applies {
                self.add_active_profiles(document.active_profiles());
                self.add_included_profiles(document.include_profiles());
                matched.push(document);
            }
        }
        matched.reverse();
        if matched.is_empty() {
            return Ok(());
        }
        for document in matched {
            self.add_to_loaded(profile, document.property_source().clone(), placement);
        }
        self.log.debug(describe(
            "Loaded config file ",
            location,
            Some(resource.as_ref()),
            profile,
        ));
        Ok(())
    }

    fn load_documents(
        &mut self,
        loader: &dyn PropertySourceLoader,
        name: &str,
        resource: &dyn Resource,
    ) -> Result<Vec<Document>, LoadError> {
        let sources = self
            .cache
            .get_or_try_insert(loader.id(), &resource.uri(), || loader.load(name, resource))?;
        // Directives bind placeholders against this run's environment.
        Ok(sources
            .iter()
            .map(|source| Document::from_property_source(source.clone(), &*self.environment))
            .collect())
    }

    fn add_to_loaded(&mut self, profile: Option<&Profile>, source: PropertySource, placement: Placement) {
        if placement == Placement::PrependIfAbsent
            && self
                .loaded
                .iter()
                .any(|(_, sources)| sources.contains(source.name()))
        {
            return;
        }
        let index = match self.loaded.iter().position(|(p, _)| p.as_ref() == profile) {
            Some(index) => index,
            None => {
                self.loaded.push((profile.cloned(), PropertySources::new()));
                self.loaded.len() - 1
            }
        };
        let sources = &mut self.loaded[index].1;
        match placement {
            Placement::Append => sources.add_last(source),
            Placement::PrependIfAbsent => sources.add_first(source),
        }
    }
}

fn join_names(profiles: &[Profile], separator: &str) -> String {
    profiles
        .iter()
        .map(Profile::name)
        .collect::<Vec<_>>()
        .join(separator)
}

fn describe(
    prefix: &str,
    location: &str,
    resource: Option<&dyn Resource>,
    profile: Option<&Profile>,
) -> String {
    let mut description = match resource {
        Some(resource) => format!("{prefix}'{}' ({location})", resource.uri()),
        None => format!("{prefix}{location}"),
    };
    if let Some(profile) = profile {
        description.push_str(&format!(" for profile {profile}"));
    }
    description
}
