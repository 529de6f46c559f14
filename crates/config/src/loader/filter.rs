//! Document filters deciding which parsed documents apply to a pass.

use crate::environment::{Environment, ProfileExpressionError};
use crate::types::{Document, Profile};

/// The two filter families used by a resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Used while draining the queue: base documents for the base pass,
    /// documents naming the profile otherwise.
    Positive,
    /// Used by the final base pass: profile-restricted documents whose
    /// expressions the environment accepts.
    Negative,
}

impl FilterKind {
    pub fn for_profile(self, profile: Option<&Profile>) -> DocumentFilter {
        DocumentFilter {
            kind: self,
            profile: profile.cloned(),
        }
    }
}

/// A filter bound to a profile (or the base sentinel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFilter {
    kind: FilterKind,
    profile: Option<Profile>,
}

impl DocumentFilter {
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Whether `document` applies under the current profile state of `environment`.
    pub fn matches(
        &self,
        document: &Document,
        environment: &Environment,
    ) -> Result<bool, ProfileExpressionError> {
        let declared = document.profiles();
        match (self.kind, &self.profile) {
            (FilterKind::Positive, None) => Ok(declared.is_empty()),
            (FilterKind::Positive, Some(profile)) => Ok(declared.iter().any(|p| p == profile.name())
                && environment.accepts_profiles(declared)?),
            (FilterKind::Negative, None) => {
                Ok(!declared.is_empty() && environment.accepts_profiles(declared)?)
            }
            (FilterKind::Negative, Some(_)) => Ok(false),
        }
    }
}
