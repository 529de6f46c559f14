//! Search-space resolution: which locations and names to probe.
//!
//! Responsibilities:
//! - Compute the ordered search locations from `app.config.location`,
//!   `app.config.additional-location` and the defaults.
//! - Compute the ordered search names from `app.config.name` and the defaults.
//! - Normalize locations supplied through properties.
//!
//! Does NOT handle:
//! - Probing resources or choosing loaders (see `resolver`).
//!
//! Invariants:
//! - Every list is reversed after splitting, so the last configured entry is probed first.
//! - Duplicates keep their first position after reversal.
//! - Locations containing `$` are used verbatim.

use crate::constants::{
    CLASSPATH_URL_PREFIX, CONFIG_ADDITIONAL_LOCATION_PROPERTY, CONFIG_LOCATION_PROPERTY,
    CONFIG_NAME_PROPERTY, DEFAULT_NAMES, DEFAULT_SEARCH_LOCATIONS, FILE_URL_PREFIX,
};
use crate::environment::Environment;

/// Resolved search locations and names for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    locations: Vec<String>,
    names: Vec<String>,
}

impl SearchSpace {
    /// Resolve the search space against `environment`.
    ///
    /// `locations` and `names` are comma-separated programmatic overrides of
    /// the built-in defaults; properties still take precedence over them.
    pub fn resolve(environment: &Environment, locations: Option<&str>, names: Option<&str>) -> Self {
        Self {
            locations: search_locations(environment, locations),
            names: search_names(environment, names),
        }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A location probed with every search name.
pub fn is_directory(location: &str) -> bool {
    location.ends_with('/')
}

fn search_locations(environment: &Environment, programmatic: Option<&str>) -> Vec<String> {
    if environment.contains_property(CONFIG_LOCATION_PROPERTY) {
        return property_locations(environment, CONFIG_LOCATION_PROPERTY);
    }
    let mut locations = property_locations(environment, CONFIG_ADDITIONAL_LOCATION_PROPERTY);
    for location in resolved_set(environment, programmatic.unwrap_or(DEFAULT_SEARCH_LOCATIONS)) {
        if !locations.contains(&location) {
            locations.push(location);
        }
    }
    locations
}

fn property_locations(environment: &Environment, key: &str) -> Vec<String> {
    let Some(value) = environment.get_property(key) else {
        return Vec::new();
    };
    let mut locations: Vec<String> = Vec::new();
    for path in resolved_set(environment, &value) {
        let path = if path.contains('$') {
            path
        } else {
            let cleaned = clean_path(&path);
            if is_url(&cleaned) {
                cleaned
            } else {
                format!("{FILE_URL_PREFIX}{cleaned}")
            }
        };
        if !locations.contains(&path) {
            locations.push(path);
        }
    }
    locations
}

fn search_names(environment: &Environment, programmatic: Option<&str>) -> Vec<String> {
    match environment.get_property(CONFIG_NAME_PROPERTY) {
        Some(value) => resolved_set(environment, &value),
        None => resolved_set(environment, programmatic.unwrap_or(DEFAULT_NAMES)),
    }
}

/// Resolve placeholders, split on commas, trim, reverse and de-duplicate.
///
/// Empty elements are kept: an empty name turns a directory into a file location.
fn resolved_set(environment: &Environment, value: &str) -> Vec<String> {
    let resolved = environment.resolve_placeholders(value);
    let mut set: Vec<String> = Vec::new();
    for element in resolved.split(',').rev() {
        let element = element.trim().to_string();
        if !set.contains(&element) {
            set.push(element);
        }
    }
    set
}

/// Schemes that mark a location as a URL rather than a file path.
const URL_SCHEMES: [&str; 4] = ["file", "http", "https", "jar"];

fn is_url(location: &str) -> bool {
    location.starts_with(CLASSPATH_URL_PREFIX)
        || url::Url::parse(location).is_ok_and(|url| URL_SCHEMES.contains(&url.scheme()))
}

/// Normalize a path: unify separators and collapse `.` and `..` segments.
///
/// A `scheme:` prefix and a leading `/` are preserved; a trailing `/` is kept.
pub fn clean_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let (mut prefix, mut rest) = match normalized.find(':') {
        Some(index) if !normalized[..index].contains('/') => (
            normalized[..=index].to_string(),
            normalized[index + 1..].to_string(),
        ),
        _ => (String::new(), normalized.clone()),
    };
    if let Some(stripped) = rest.strip_prefix('/') {
        prefix.push('/');
        rest = stripped.to_string();
    }

    let mut elements: Vec<&str> = Vec::new();
    let mut tops = 0;
    for element in rest.split('/').rev() {
        match element {
            "." => {}
            ".." => tops += 1,
            _ if tops > 0 => tops -= 1,
            _ => elements.push(element),
        }
    }
    elements.extend(std::iter::repeat_n("..", tops));
    elements.reverse();
    format!("{prefix}{}", elements.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(args: &[&str]) -> Environment {
        Environment::new().with_command_line_args(args)
    }

    #[test]
    fn test_defaults_are_reversed() {
        let space = SearchSpace::resolve(&Environment::new(), None, None);
        assert_eq!(
            space.locations(),
            ["file:./config/", "file:./", "classpath:/config/", "classpath:/"]
        );
        assert_eq!(space.names(), ["application"]);
    }

    #[test]
    fn test_location_property_replaces_defaults() {
        let space = SearchSpace::resolve(
            &env(&["--app.config.location=classpath:/custom/,./conf/"]),
            None,
            None,
        );
        assert_eq!(space.locations(), ["file:conf/", "classpath:/custom/"]);
    }

    #[test]
    fn test_additional_locations_come_first() {
        let space = SearchSpace::resolve(
            &env(&["--app.config.additional-location=/etc/app/,file:./override/"]),
            None,
            None,
        );
        assert_eq!(
            space.locations(),
            [
                "file:override/",
                "file:/etc/app/",
                "file:./config/",
                "file:./",
                "classpath:/config/",
                "classpath:/"
            ]
        );
    }

    #[test]
    fn test_programmatic_locations_and_names() {
        let space = SearchSpace::resolve(&Environment::new(), Some("classpath:/a/,classpath:/b/"), Some("one,two"));
        assert_eq!(space.locations(), ["classpath:/b/", "classpath:/a/"]);
        assert_eq!(space.names(), ["two", "one"]);
    }

    #[test]
    fn test_name_property_wins_over_programmatic() {
        let space = SearchSpace::resolve(&env(&["--app.config.name=base, ${extra:local}, base"]), None, Some("ignored"));
        assert_eq!(space.names(), ["base", "local"]);
    }

    #[test]
    fn test_placeholder_locations_are_verbatim() {
        let space = SearchSpace::resolve(&env(&["--app.config.location=${missing}/conf/"]), None, None);
        assert_eq!(space.locations(), ["${missing}/conf/"]);
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("file:./config/"), "file:config/");
        assert_eq!(clean_path("./a/../b/c.yml"), "b/c.yml");
        assert_eq!(clean_path("/etc/./app/"), "/etc/app/");
        assert_eq!(clean_path("../x/"), "../x/");
        assert_eq!(clean_path("dir\\sub\\app.yml"), "dir/sub/app.yml");
        assert_eq!(clean_path("classpath:/a/../b/"), "classpath:/b/");
    }

    #[test]
    fn test_only_known_schemes_count_as_urls() {
        assert!(is_url("classpath:/conf/"));
        assert!(is_url("file:conf/"));
        assert!(is_url("https://config.example.com/app/"));
        assert!(!is_url("C:/conf/"));
        assert!(!is_url("conf:x/"));
        assert!(!is_url("conf/"));
    }

    #[test]
    fn test_drive_letter_locations_get_file_prefix() {
        let space = SearchSpace::resolve(
            &env(&["--app.config.location=C:/conf/,conf:x/"]),
            None,
            None,
        );
        assert_eq!(space.locations(), ["file:conf:x/", "file:C:/conf/"]);
    }

    #[test]
    fn test_is_directory() {
        assert!(is_directory("classpath:/config/"));
        assert!(!is_directory("file:./custom.yml"));
    }
}
