//! qmesh-setup - Packaging-time environment checks for qmesh.
//!
//! qmesh depends on two external tools that are not installed with the
//! package: the gmsh mesh generator and the QGIS toolkit with its Python
//! API. This crate locates and verifies both, then writes distribution
//! metadata (git commit, licence, authors, verified tool paths) next to the
//! package so the installed program can find them at run time.
//!
//! # Modules
//!
//! - [`checks`] - Tool location and verification
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and merging
//! - [`context`] - State shared by one packaging run
//! - [`error`] - Error types and result aliases
//! - [`metadata`] - Distribution metadata artifacts
//! - [`shell`] - Executable lookup and subprocess capture
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use qmesh_setup::context::DistributionContext;
//! use qmesh_setup::metadata::{write_all, NO_GIT_SHA_KEY};
//!
//! let project = tempfile::tempdir().unwrap();
//! let ctx = DistributionContext {
//!     project_root: project.path().to_path_buf(),
//!     include_git_sha_key: true,
//!     ..Default::default()
//! };
//! let egg = project.path().join("qmesh.egg-info");
//! write_all(&ctx, &egg).unwrap();
//!
//! let key = std::fs::read_to_string(egg.join("git_sha_key.txt")).unwrap();
//! assert_eq!(key, NO_GIT_SHA_KEY);
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod metadata;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
