//! Regression tests for hermetic test isolation around dotenv loading.
//!
//! Responsibilities:
//! - Prove that setting `DOTENV_DISABLED=1` prevents the CLI from loading `.env`.
//! - Prove that when not disabled, the CLI loads `.env` from the working directory.
//!
//! Invariants / assumptions:
//! - The CLI loads dotenv before clap parsing (so clap `env = "..."` can read `.env` values).

mod common;

use common::{project, project_cmd};

#[test]
fn test_dotenv_disabled_ignores_env_file() {
    let dir = project();
    std::fs::write(dir.path().join(".env"), "CONFSTACK_PROFILES=prod\n").unwrap();

    project_cmd(dir.path())
        .env("DOTENV_DISABLED", "1")
        .args(["get", "color"])
        .assert()
        .success()
        .stdout("blue\n");
}

#[test]
fn test_dotenv_enabled_loads_env_file() {
    let dir = project();
    std::fs::write(dir.path().join(".env"), "CONFSTACK_PROFILES=prod\n").unwrap();

    let mut cmd = project_cmd(dir.path());
    // Explicitly enable dotenv for the spawned process, even if the parent runner has it disabled.
    cmd.env_remove("DOTENV_DISABLED");
    cmd.args(["get", "color"]).assert().success().stdout("red\n");
}
