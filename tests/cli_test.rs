//! Integration tests for the qmesh-setup binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".qmesh");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yml"), config).unwrap();
    temp
}

fn qmesh_setup() -> Command {
    let mut cmd = Command::new(cargo_bin("qmesh-setup"));
    cmd.env_remove("QMESH_GMSH_BIN_PATH")
        .env_remove("QMESH_QGIS_PATH")
        .env("NO_COLOR", "1");
    cmd
}

const METADATA_CONFIG: &str = r#"
name: qmesh3
include_git_sha_key: true
include_full_license: true
include_author_ids: true
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    qmesh_setup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check-gmsh"))
        .stdout(predicate::str::contains("egg-info"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    qmesh_setup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    qmesh_setup().assert().failure();
    Ok(())
}

#[test]
fn check_gmsh_rejects_missing_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    qmesh_setup()
        .current_dir(temp.path())
        .args(["check-gmsh", "--gmsh-bin-path", "/no/such/gmsh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "'gmsh_bin_path' must be a path ('/no/such/gmsh' is not a path)",
        ));
    Ok(())
}

#[test]
fn check_gmsh_reads_override_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    qmesh_setup()
        .current_dir(temp.path())
        .env("QMESH_GMSH_BIN_PATH", "/no/such/gmsh/dir")
        .arg("check-gmsh")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("/no/such/gmsh/dir"));
    Ok(())
}

#[test]
fn check_qgis_rejects_missing_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    qmesh_setup()
        .current_dir(temp.path())
        .args(["check-qgis", "--qgis-path", "/no/such/qgis"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'qgis-path' must be a path"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn check_gmsh_accepts_directory_override() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new()?;
    let bin = temp.path().join("bin");
    fs::create_dir_all(&bin)?;
    let gmsh = bin.join("gmsh");
    fs::write(&gmsh, "#!/bin/sh\necho 4.11.1\necho 'extra line'\n")?;
    fs::set_permissions(&gmsh, fs::Permissions::from_mode(0o755))?;

    qmesh_setup()
        .current_dir(temp.path())
        .arg("check-gmsh")
        .arg("--gmsh-bin-path")
        .arg(&bin)
        .assert()
        .success()
        .stdout(predicate::str::contains("gmsh 4.11.1"))
        .stdout(predicate::str::contains("extra line").not());
    Ok(())
}

#[test]
fn check_env_json_reports_missing_tools() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let empty_path = TempDir::new()?;

    let output = qmesh_setup()
        .current_dir(temp.path())
        .env("PATH", empty_path.path())
        .args(["check-env", "--json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let results: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let results = results.as_array().expect("JSON array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["tool"], "gmsh");
    assert_eq!(results[0]["found"], false);
    assert_eq!(results[1]["tool"], "qgis");
    assert_eq!(results[1]["found"], false);
    Ok(())
}

#[test]
fn egg_info_writes_enabled_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(METADATA_CONFIG);
    fs::write(temp.path().join("LICENSE"), "GNU GPL v3\n")?;
    fs::write(temp.path().join("AUTHORS.md"), "* Alexandros Avdis\n")?;

    qmesh_setup()
        .current_dir(temp.path())
        .arg("egg-info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 metadata file(s)"));

    let egg = temp.path().join("qmesh3.egg-info");
    assert_eq!(fs::read_to_string(egg.join("LICENSE"))?, "GNU GPL v3\n");
    assert_eq!(
        fs::read_to_string(egg.join("AUTHORS.md"))?,
        "* Alexandros Avdis\n"
    );
    assert_eq!(
        fs::read_to_string(egg.join("git_sha_key.txt"))?,
        "Could not obtain git sha key."
    );
    assert!(!egg.join("gmsh_bin_path.txt").exists());
    Ok(())
}

#[test]
fn egg_info_honours_egg_base_and_project() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("include_git_sha_key: true\n");
    let out = TempDir::new()?;
    let egg = out.path().join("meta");

    qmesh_setup()
        .arg("--project")
        .arg(temp.path())
        .arg("egg-info")
        .arg("--egg-base")
        .arg(&egg)
        .assert()
        .success();

    assert!(egg.join("git_sha_key.txt").is_file());
    Ok(())
}

#[test]
fn egg_info_fails_without_license_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("include_full_license: true\n");

    qmesh_setup()
        .current_dir(temp.path())
        .arg("egg-info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn invalid_config_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("include_author_ids: [1, 2]\n");

    qmesh_setup()
        .current_dir(temp.path())
        .arg("egg-info")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn completions_generate_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    qmesh_setup()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qmesh-setup"));
    Ok(())
}
