//! Configuration schema definitions.
//!
//! These structs map to the `.qmesh/config.yml` file format. Top-level keys
//! mirror the keywords a qmesh package passes to its packaging setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.qmesh/config.yml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Distribution name, used for the default egg-info directory name.
    pub name: String,

    /// Write the repository's git sha key into the metadata directory.
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_git_sha_key: bool,

    /// Copy the full licence statement into the metadata directory.
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_full_license: bool,

    /// Copy the author list into the metadata directory.
    #[serde(default, skip_serializing_if = "is_false")]
    pub include_author_ids: bool,

    /// Licence file, relative to the project root.
    #[serde(default = "default_license_file")]
    pub license_file: PathBuf,

    /// Authors file, relative to the project root.
    #[serde(default = "default_authors_file")]
    pub authors_file: PathBuf,

    /// Known location of the gmsh binary or its directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmsh_bin_path: Option<PathBuf>,

    /// Known QGIS installation root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qgis_path: Option<PathBuf>,

    /// Global settings
    pub settings: Settings,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            include_git_sha_key: false,
            include_full_license: false,
            include_author_ids: false,
            license_file: default_license_file(),
            authors_file: default_authors_file(),
            gmsh_bin_path: None,
            qgis_path: None,
            settings: Settings::default(),
        }
    }
}

/// Settings that affect how checks are run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Python interpreter used to drive the QGIS Python API.
    #[serde(default = "default_python")]
    pub python: String,

    /// Timeout in seconds for version probes (None = wait indefinitely).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Default output mode: verbose, normal, quiet, silent
    #[serde(default)]
    pub default_output: OutputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            python: default_python(),
            timeout_secs: None,
            default_output: OutputMode::default(),
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

fn default_name() -> String {
    "qmesh".to_string()
}

fn default_license_file() -> PathBuf {
    PathBuf::from("LICENSE")
}

fn default_authors_file() -> PathBuf {
    PathBuf::from("AUTHORS.md")
}

fn default_python() -> String {
    if cfg!(target_os = "windows") {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}
