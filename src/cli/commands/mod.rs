//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! project configuration into a
//! [`DistributionContext`](crate::context::DistributionContext) and routes
//! CLI subcommands to their implementations. Commands that probe tools
//! accept a replacement lookup and toolkit runtime for testing.

pub mod build;
pub mod check_env;
pub mod check_gmsh;
pub mod check_qgis;
pub mod completions;
pub mod dispatcher;
pub mod egg_info;

pub use build::BuildCommand;
pub use check_env::CheckEnvCommand;
pub use check_gmsh::CheckGmshCommand;
pub use check_qgis::CheckQgisCommand;
pub use completions::CompletionsCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use egg_info::EggInfoCommand;
