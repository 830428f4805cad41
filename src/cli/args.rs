//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// qmesh-setup - Check qmesh's external tools and write its package metadata.
#[derive(Debug, Parser)]
#[command(name = "qmesh-setup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .qmesh/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Seconds to wait for each tool probe before giving up
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Locate gmsh and check that it runs
    CheckGmsh(CheckGmshArgs),

    /// Locate QGIS and check that its Python API loads
    CheckQgis(CheckQgisArgs),

    /// Report on both tools without writing anything
    CheckEnv(CheckEnvArgs),

    /// Write the package metadata artifacts
    EggInfo(EggInfoArgs),

    /// Check both tools, then write the package metadata artifacts
    Build(BuildArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check-gmsh` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckGmshArgs {
    /// gmsh binary, or the directory containing it
    #[arg(long, env = "QMESH_GMSH_BIN_PATH", value_name = "PATH")]
    pub gmsh_bin_path: Option<PathBuf>,
}

/// Arguments for the `check-qgis` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckQgisArgs {
    /// QGIS installation root
    #[arg(long, env = "QMESH_QGIS_PATH", value_name = "PATH")]
    pub qgis_path: Option<PathBuf>,
}

/// Arguments for the `check-env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckEnvArgs {
    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `egg-info` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EggInfoArgs {
    /// Directory to write the artifacts to (default: <project>/<name>.egg-info)
    #[arg(long, value_name = "DIR")]
    pub egg_base: Option<PathBuf>,
}

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// gmsh binary, or the directory containing it
    #[arg(long, env = "QMESH_GMSH_BIN_PATH", value_name = "PATH")]
    pub gmsh_bin_path: Option<PathBuf>,

    /// QGIS installation root
    #[arg(long, env = "QMESH_QGIS_PATH", value_name = "PATH")]
    pub qgis_path: Option<PathBuf>,

    /// Directory to write the artifacts to (default: <project>/<name>.egg-info)
    #[arg(long, value_name = "DIR")]
    pub egg_base: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
