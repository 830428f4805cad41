//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use qmesh_setup::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".qmesh");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "name: qmesh3\ninclude_git_sha_key: true").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.name, "qmesh3");
//! assert!(config.include_git_sha_key);
//! ```
//!
//! # Configuration File Locations
//!
//! Merged in this order:
//! 1. Project config (`.qmesh/config.yml`)
//! 2. Local overrides (`.qmesh/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{load_config, load_config_value, load_merged_config, ConfigPaths, CONFIG_DIR};
pub use merger::{deep_merge, merge_configs};
pub use schema::{OutputMode, Settings, SetupConfig};
