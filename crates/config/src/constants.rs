//! Centralized constants for configuration-file resolution.
//!
//! Property keys, reserved source names and the default search space live here
//! so the loader, the environment and the CLI agree on them.

// =============================================================================
// Directive Property Keys
// =============================================================================

/// Profiles a document applies to (`app.profiles`).
pub const PROFILES_PROPERTY: &str = "app.profiles";

/// The "active profiles" directive.
pub const ACTIVE_PROFILES_PROPERTY: &str = "app.profiles.active";

/// The "include profiles" directive.
pub const INCLUDE_PROFILES_PROPERTY: &str = "app.profiles.include";

/// Overrides the environment's default profile names.
pub const DEFAULT_PROFILES_PROPERTY: &str = "app.profiles.default";

/// Replaces the default configuration file name stem(s).
pub const CONFIG_NAME_PROPERTY: &str = "app.config.name";

/// Replaces the default search locations entirely.
pub const CONFIG_LOCATION_PROPERTY: &str = "app.config.location";

/// Adds search locations in front of the default ones.
pub const CONFIG_ADDITIONAL_LOCATION_PROPERTY: &str = "app.config.additional-location";

/// Directives hidden from the anchor source while a resolution run is in progress.
pub const LOAD_FILTERED_PROPERTIES: &[&str] = &[ACTIVE_PROFILES_PROPERTY, INCLUDE_PROFILES_PROPERTY];

// =============================================================================
// Reserved Property Source Names
// =============================================================================

/// The low-priority anchor source. Always ends up last.
pub const DEFAULT_PROPERTIES: &str = "defaultProperties";

/// Source holding `--key=value` style command line properties.
pub const COMMAND_LINE_PROPERTIES: &str = "commandLineArgs";

/// Source holding the process environment.
pub const SYSTEM_ENVIRONMENT_PROPERTIES: &str = "systemEnvironment";

/// Prefix of every property source loaded from a configuration file.
pub const APPLICATION_CONFIG_PREFIX: &str = "applicationConfig: ";

// =============================================================================
// Search Space Defaults
// =============================================================================

/// Default search locations, ordered from least to most specific (last one wins).
pub const DEFAULT_SEARCH_LOCATIONS: &str = "classpath:/,classpath:/config/,file:./,file:./config/";

/// Default configuration file name stem.
pub const DEFAULT_NAMES: &str = "application";

/// Name of the profile that is active when nothing else is.
pub const RESERVED_DEFAULT_PROFILE: &str = "default";

// =============================================================================
// Resource Prefixes
// =============================================================================

/// Location prefix resolved against the classpath roots.
pub const CLASSPATH_URL_PREFIX: &str = "classpath:";

/// Location prefix resolved against the file system.
pub const FILE_URL_PREFIX: &str = "file:";
