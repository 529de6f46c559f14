//! Commit the final active profiles after a run.
//!
//! The final list is the anchor's include directive, then its active
//! directive unless a run already applied one, then every explicitly
//! requested profile that was processed. Implicit defaults are left out and
//! stay effective through the environment's default-profile fallback.

use crate::constants::{ACTIVE_PROFILES_PROPERTY, INCLUDE_PROFILES_PROPERTY};
use crate::environment::Environment;
use crate::types::{Profile, PropertySource};

/// Whether `profile` was requested rather than added as an implicit default.
pub(crate) fn is_explicit(profile: &Profile) -> bool {
    !profile.is_default_profile()
}

/// Replace the environment's active profiles with the reconciled list.
pub fn apply_active_profiles(
    environment: &mut Environment,
    anchor: Option<&PropertySource>,
    processed: &[Option<Profile>],
    activated: bool,
) {
    let mut active: Vec<String> = Vec::new();
    if let Some(anchor) = anchor {
        let resolve = |value: &str| environment.resolve_placeholders(value);
        active.extend(
            anchor
                .bind_string_list(INCLUDE_PROFILES_PROPERTY, &resolve)
                .unwrap_or_default(),
        );
        if !activated {
            active.extend(
                anchor
                    .bind_string_list(ACTIVE_PROFILES_PROPERTY, &resolve)
                    .unwrap_or_default(),
            );
        }
    }
    active.extend(
        processed
            .iter()
            .flatten()
            .filter(|p| is_explicit(p))
            .map(|p| p.name().to_string()),
    );
    environment.set_active_profiles(active);
}
