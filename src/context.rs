//! Pipeline-scoped distribution state.
//!
//! A [`DistributionContext`] is created once per packaging run from the
//! loaded configuration, mutated by the tool checks as they validate
//! locations, and read by the metadata writers. It is passed explicitly to
//! every stage.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::SetupConfig;

/// Shared state for one packaging run.
#[derive(Debug, Clone, Default)]
pub struct DistributionContext {
    /// Distribution name.
    pub name: String,

    /// Root of the project being packaged.
    pub project_root: PathBuf,

    /// Emit the git sha key artifact.
    pub include_git_sha_key: bool,

    /// Emit the full licence artifact.
    pub include_full_license: bool,

    /// Emit the author list artifact.
    pub include_author_ids: bool,

    /// Licence source file (relative paths resolve against `project_root`).
    pub license_file: PathBuf,

    /// Authors source file (relative paths resolve against `project_root`).
    pub authors_file: PathBuf,

    /// Location of the gmsh binary, once known.
    pub gmsh_bin_path: Option<PathBuf>,

    /// QGIS installation root, once known.
    pub qgis_path: Option<PathBuf>,

    /// Python interpreter that hosts the QGIS API.
    pub python: String,

    /// Limit on each probe subprocess.
    pub timeout: Option<Duration>,
}

impl DistributionContext {
    /// Build the context for a project from its configuration.
    pub fn from_config(project_root: &Path, config: &SetupConfig) -> Self {
        Self {
            name: config.name.clone(),
            project_root: project_root.to_path_buf(),
            include_git_sha_key: config.include_git_sha_key,
            include_full_license: config.include_full_license,
            include_author_ids: config.include_author_ids,
            license_file: config.license_file.clone(),
            authors_file: config.authors_file.clone(),
            gmsh_bin_path: config.gmsh_bin_path.clone(),
            qgis_path: config.qgis_path.clone(),
            python: config.settings.python.clone(),
            timeout: config.settings.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Resolve a path from the configuration against the project root.
    pub fn project_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Default metadata directory: `<project_root>/<name>.egg-info`.
    pub fn default_egg_base(&self) -> PathBuf {
        self.project_root
            .join(format!("{}.egg-info", self.name.replace('-', "_")))
    }
}
