//! End-to-end tests for the `sources`, `profiles`, `get` and `dump` commands.

mod common;

use common::{project, project_cmd, write};
use predicates::prelude::*;

#[test]
fn test_get_uses_active_profile() {
    let dir = project();
    project_cmd(dir.path())
        .args(["--profile", "prod", "get", "color"])
        .assert()
        .success()
        .stdout("red\n");
}

#[test]
fn test_get_falls_back_to_base_file() {
    let dir = project();
    project_cmd(dir.path())
        .args(["get", "color"])
        .assert()
        .success()
        .stdout("blue\n");
}

#[test]
fn test_profiles_lists_explicit_activation() {
    let dir = project();
    project_cmd(dir.path())
        .args(["--profile", "prod", "profiles"])
        .assert()
        .success()
        .stdout("prod\n");
}

#[test]
fn test_profiles_from_environment_variable() {
    let dir = project();
    project_cmd(dir.path())
        .env("CONFSTACK_PROFILES", "prod")
        .args(["get", "color"])
        .assert()
        .success()
        .stdout("red\n");
}

#[test]
fn test_profiles_without_activation_show_defaults() {
    let dir = project();
    project_cmd(dir.path())
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("default profiles: default"));
}

#[test]
fn test_sources_in_precedence_order() {
    let dir = project();
    write(dir.path(), "config/application.yml", "shape: square\n");
    project_cmd(dir.path())
        .args(["--no-system-env", "--profile", "prod", "--default", "a=1", "sources"])
        .assert()
        .success()
        .stdout(
            "commandLineArgs\t1\n\
             applicationConfig: [classpath:/application-prod.properties]\t1\n\
             applicationConfig: [file:./config/application.yml]\t1\n\
             applicationConfig: [classpath:/application.properties]\t2\n\
             defaultProperties\t1\n",
        );
}

#[test]
fn test_set_overrides_files() {
    let dir = project();
    project_cmd(dir.path())
        .args(["--set", "color=cli", "--profile", "prod", "get", "color"])
        .assert()
        .success()
        .stdout("cli\n");
}

#[test]
fn test_process_environment_overrides_files() {
    let dir = project();
    project_cmd(dir.path())
        .env("SHAPE", "hexagon")
        .args(["get", "shape"])
        .assert()
        .success()
        .stdout("hexagon\n");
}

#[test]
fn test_get_json_names_source() {
    let dir = project();
    let output = project_cmd(dir.path())
        .args(["--profile", "prod", "--format", "json", "get", "color"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["value"], "red");
    assert_eq!(
        parsed["source"],
        "applicationConfig: [classpath:/application-prod.properties]"
    );
}

#[test]
fn test_dump_effective_properties() {
    let dir = project();
    project_cmd(dir.path())
        .args(["--no-system-env", "--profile", "prod", "dump"])
        .assert()
        .success()
        .stdout("app.profiles.active=prod\ncolor=red\nshape=circle\n");
}

#[test]
fn test_config_name_via_set() {
    let dir = project();
    write(dir.path(), "resources/service.yml", "color: purple\n");
    project_cmd(dir.path())
        .args(["--set", "app.config.name=service", "get", "color"])
        .assert()
        .success()
        .stdout("purple\n");
}

#[test]
fn test_verbose_logs_loaded_files_to_stderr() {
    let dir = project();
    project_cmd(dir.path())
        .args(["--verbose", "--profile", "prod", "get", "color"])
        .assert()
        .success()
        .stdout("red\n")
        .stderr(predicate::str::contains(
            "Loaded config file 'file:",
        ))
        .stderr(predicate::str::contains("application-prod.properties"));
}
