//! Resource handles and the loaders that resolve location strings to them.
//!
//! Responsibilities:
//! - Define the `Resource` and `ResourceLoader` seams used by the resolution engine.
//! - Resolve `file:` and `classpath:` locations against the local file system.
//! - Provide an in-memory loader for embedding configuration and for tests.
//!
//! Does NOT handle:
//! - Network fetching; locations with other URL schemes resolve to `None`.
//!
//! Invariants:
//! - `uri()` is stable for a given underlying file and identifies it in the document cache.
//! - A resource returned for a location that does not exist reports `exists() == false`.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{CLASSPATH_URL_PREFIX, FILE_URL_PREFIX};

/// A readable configuration resource.
pub trait Resource: fmt::Debug {
    fn exists(&self) -> bool;

    /// File name including extension, if the resource has one.
    fn filename(&self) -> Option<String>;

    /// Stable identity of the underlying content.
    fn uri(&self) -> String;

    fn read_to_string(&self) -> io::Result<String>;

    /// Extension of `filename()`, if any.
    fn extension(&self) -> Option<String> {
        let filename = self.filename()?;
        let (stem, extension) = filename.rsplit_once('.')?;
        if stem.is_empty() || extension.is_empty() {
            return None;
        }
        Some(extension.to_string())
    }
}

/// Resolves location strings to resources.
pub trait ResourceLoader: fmt::Debug {
    fn get_resource(&self, location: &str) -> Option<Box<dyn Resource>>;
}

/// A resource backed by a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resource for FileResource {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn filename(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    fn uri(&self) -> String {
        let absolute = std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone());
        format!("{FILE_URL_PREFIX}{}", absolute.display())
    }

    fn read_to_string(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Resolves locations against the local file system.
///
/// `file:` locations and absolute paths are read from disk relative to
/// `base_dir`. `classpath:` and un-prefixed locations are probed against each
/// classpath root in order; the first root holding the file wins.
#[derive(Debug, Clone)]
pub struct FileSystemResourceLoader {
    base_dir: PathBuf,
    classpath_roots: Vec<PathBuf>,
}

impl FileSystemResourceLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            classpath_roots: Vec::new(),
        }
    }

    /// Add a directory searched for `classpath:` locations.
    pub fn with_classpath_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            self.base_dir.join(root)
        };
        self.classpath_roots.push(root);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_resource(&self, path: &str) -> FileResource {
        let path = Path::new(path);
        if path.is_absolute() {
            FileResource::new(path)
        } else {
            FileResource::new(self.base_dir.join(path))
        }
    }

    fn classpath_resource(&self, path: &str) -> Option<FileResource> {
        let relative = path.trim_start_matches('/');
        let candidates: Vec<FileResource> = self
            .classpath_roots
            .iter()
            .map(|root| FileResource::new(root.join(relative)))
            .collect();
        let first_existing = candidates.iter().position(|r| r.exists());
        candidates.into_iter().nth(first_existing.unwrap_or(0))
    }
}

impl ResourceLoader for FileSystemResourceLoader {
    fn get_resource(&self, location: &str) -> Option<Box<dyn Resource>> {
        if let Some(path) = location.strip_prefix(CLASSPATH_URL_PREFIX) {
            return self
                .classpath_resource(path)
                .map(|r| Box::new(r) as Box<dyn Resource>);
        }
        if let Some(path) = location.strip_prefix(FILE_URL_PREFIX) {
            let path = path.strip_prefix("//").unwrap_or(path);
            return Some(Box::new(self.file_resource(path)));
        }
        if Path::new(location).is_absolute() {
            return Some(Box::new(self.file_resource(location)));
        }
        if url::Url::parse(location).is_ok() {
            tracing::trace!(location, "Unsupported resource scheme");
            return None;
        }
        self.classpath_resource(location)
            .map(|r| Box::new(r) as Box<dyn Resource>)
    }
}

/// A resource held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryResource {
    location: String,
    content: Option<String>,
}

impl Resource for MemoryResource {
    fn exists(&self) -> bool {
        self.content.is_some()
    }

    fn filename(&self) -> Option<String> {
        let name = self.location.rsplit(['/', ':']).next()?;
        (!name.is_empty()).then(|| name.to_string())
    }

    fn uri(&self) -> String {
        format!("memory:{}", self.location)
    }

    fn read_to_string(&self) -> io::Result<String> {
        self.content.clone().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory resource at {}", self.location),
            )
        })
    }
}

/// Serves resources from an in-memory map of normalized locations.
///
/// `classpath:/a.yml`, `classpath:a.yml` and `a.yml` all address the same entry.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceLoader {
    files: BTreeMap<String, String>,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, location: &str, content: impl Into<String>) -> Self {
        self.insert(location, content);
        self
    }

    pub fn insert(&mut self, location: &str, content: impl Into<String>) {
        self.files.insert(normalize_memory_location(location), content.into());
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn get_resource(&self, location: &str) -> Option<Box<dyn Resource>> {
        let location = normalize_memory_location(location);
        let content = self.files.get(&location).cloned();
        Some(Box::new(MemoryResource { location, content }))
    }
}

fn normalize_memory_location(location: &str) -> String {
    if let Some(file) = location.strip_prefix(FILE_URL_PREFIX) {
        let file = file.strip_prefix("./").unwrap_or(file);
        return format!("{FILE_URL_PREFIX}{file}");
    }
    let path = location
        .strip_prefix(CLASSPATH_URL_PREFIX)
        .unwrap_or(location)
        .trim_start_matches('/');
    format!("{CLASSPATH_URL_PREFIX}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_classpath_first_existing_root_wins() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first");
        let second = temp_dir.path().join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(second.join("application.yml"), "a: 1").unwrap();

        let loader = FileSystemResourceLoader::new(temp_dir.path())
            .with_classpath_root(&first)
            .with_classpath_root(&second);
        let resource = loader.get_resource("classpath:/application.yml").unwrap();
        assert!(resource.exists());
        assert_eq!(resource.read_to_string().unwrap(), "a: 1");

        let missing = loader.get_resource("classpath:/missing.yml").unwrap();
        assert!(!missing.exists());
    }

    #[test]
    fn test_file_locations_resolve_against_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("config")).unwrap();
        fs::write(temp_dir.path().join("config/app.properties"), "a=1").unwrap();

        let loader = FileSystemResourceLoader::new(temp_dir.path());
        let resource = loader.get_resource("file:./config/app.properties").unwrap();
        assert!(resource.exists());
        assert_eq!(resource.filename().as_deref(), Some("app.properties"));
        assert_eq!(resource.extension().as_deref(), Some("properties"));
        assert!(resource.uri().starts_with("file:"));
    }

    #[test]
    fn test_classpath_without_roots_is_none() {
        let loader = FileSystemResourceLoader::new(".");
        assert!(loader.get_resource("classpath:/application.yml").is_none());
    }

    #[test]
    fn test_unsupported_scheme_is_none() {
        let loader = FileSystemResourceLoader::new(".");
        assert!(loader.get_resource("https://example.org/app.yml").is_none());
    }

    #[test]
    fn test_extension_requires_stem_and_suffix() {
        let loader = MemoryResourceLoader::new()
            .with_file("classpath:/config", "a=1")
            .with_file("classpath:/.env", "a=1");
        assert_eq!(loader.get_resource("classpath:/config").unwrap().extension(), None);
        assert_eq!(loader.get_resource("classpath:/.env").unwrap().extension(), None);
    }

    #[test]
    fn test_memory_locations_are_normalized() {
        let loader = MemoryResourceLoader::new()
            .with_file("classpath:/application.yml", "a: 1")
            .with_file("file:./config/application.yml", "b: 2");
        assert!(loader.get_resource("classpath:application.yml").unwrap().exists());
        assert!(loader.get_resource("application.yml").unwrap().exists());
        assert!(loader.get_resource("file:config/application.yml").unwrap().exists());
        assert!(!loader.get_resource("classpath:/config/application.yml").unwrap().exists());
        assert_eq!(
            loader.get_resource("classpath:/application.yml").unwrap().uri(),
            "memory:classpath:application.yml"
        );
    }
}
