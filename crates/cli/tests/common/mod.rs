//! Shared test utilities for confstack integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Lay out throwaway project directories with configuration files.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - `CONFSTACK_*` variables from the host never reach the spawned process.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a hermetic `confstack` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `CONFSTACK_*` and `APP_*` variables are cleared to ensure no leakage from the host.
pub fn confstack_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confstack");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("CONFSTACK_DIR")
        .env_remove("CONFSTACK_CLASSPATH")
        .env_remove("CONFSTACK_PROFILES")
        .env_remove("CONFSTACK_SEARCH_LOCATIONS")
        .env_remove("CONFSTACK_SEARCH_NAMES")
        .env_remove("CONFSTACK_FORMAT")
        .env_remove("APP_PROFILES_ACTIVE")
        .env_remove("APP_PROFILES_INCLUDE")
        .env_remove("APP_CONFIG_NAME")
        .env_remove("APP_CONFIG_LOCATION")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic command rooted at `dir` with `resources/` as classpath.
pub fn project_cmd(dir: &Path) -> Command {
    let mut cmd = confstack_cmd();
    cmd.current_dir(dir)
        .arg("--dir")
        .arg(dir)
        .args(["--classpath", "resources"]);
    cmd
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project with a base file and a `prod` profile file on the classpath.
pub fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "resources/application.properties",
        "color=blue\nshape=circle\n",
    );
    write(dir.path(), "resources/application-prod.properties", "color=red\n");
    dir
}
