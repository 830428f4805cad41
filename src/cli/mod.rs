//! Command-line interface for qmesh-setup.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    BuildArgs, CheckEnvArgs, CheckGmshArgs, CheckQgisArgs, Cli, Commands, CompletionsArgs,
    EggInfoArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
