//! Profile value type.
//!
//! Responsibilities:
//! - Name a configuration variant that gates which documents apply.
//! - Remember whether the profile was added implicitly as an environment default.
//!
//! Invariants:
//! - Equality and hashing use the name only; the default flag is excluded.
//! - Profiles are immutable once created.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A named configuration profile that can be loaded.
#[derive(Debug, Clone, Eq)]
pub struct Profile {
    name: String,
    default_profile: bool,
}

impl Profile {
    /// Create an explicitly requested profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_default_flag(name, false)
    }

    /// Create a profile that was added implicitly from the environment defaults.
    pub fn implicit_default(name: impl Into<String>) -> Self {
        Self::with_default_flag(name, true)
    }

    fn with_default_flag(name: impl Into<String>, default_profile: bool) -> Self {
        Self {
            name: name.into(),
            default_profile,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this profile was enqueued as an implicit environment default.
    pub fn is_default_profile(&self) -> bool {
        self.default_profile
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Profile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Build an ordered, de-duplicated profile set from names.
pub(crate) fn profile_set<I, S>(names: I) -> Vec<Profile>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut profiles: Vec<Profile> = Vec::new();
    for name in names {
        let profile = Profile::new(name);
        if !profiles.contains(&profile) {
            profiles.push(profile);
        }
    }
    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_default_flag() {
        assert_eq!(Profile::new("dev"), Profile::implicit_default("dev"));
        assert_ne!(Profile::new("dev"), Profile::new("prod"));
    }

    #[test]
    fn test_hash_uses_name_only() {
        let mut set = HashSet::new();
        set.insert(Profile::new("dev"));
        assert!(!set.insert(Profile::implicit_default("dev")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(Profile::implicit_default("default").to_string(), "default");
    }

    #[test]
    fn test_profile_set_keeps_first_occurrence_order() {
        let set = profile_set(["b", "a", "b", "c", "a"]);
        let names: Vec<&str> = set.iter().map(Profile::name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
