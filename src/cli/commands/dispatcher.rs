//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, SetupConfig};
use crate::context::DistributionContext;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, reporting progress through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build the distribution context from the project's configuration.
    ///
    /// `timeout_secs` overrides `settings.timeout_secs`.
    pub fn context(
        &self,
        config_override: Option<&Path>,
        timeout_secs: Option<u64>,
    ) -> Result<DistributionContext> {
        let config = load_config(&self.project_root, config_override)?;
        Ok(self.context_from(&config, timeout_secs))
    }

    /// Tool paths from config files resolve against the project root.
    fn context_from(&self, config: &SetupConfig, timeout_secs: Option<u64>) -> DistributionContext {
        let mut ctx = DistributionContext::from_config(&self.project_root, config);

        ctx.gmsh_bin_path = ctx.gmsh_bin_path.take().map(|p| ctx.project_path(&p));
        ctx.qgis_path = ctx.qgis_path.take().map(|p| ctx.project_path(&p));
        if let Some(secs) = timeout_secs {
            ctx.timeout = Some(Duration::from_secs(secs));
        }

        tracing::debug!("Distribution context: {:?}", ctx);
        ctx
    }

    /// Context for a CLI invocation.
    ///
    /// The configured output mode applies unless a flag chose one.
    fn cli_context(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<DistributionContext> {
        let config = load_config(&self.project_root, cli.config.as_deref())?;
        if !cli.verbose && !cli.quiet {
            ui.set_output_mode(config.settings.default_output.into());
        }
        Ok(self.context_from(&config, cli.timeout))
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::CheckGmsh(args) => {
                let ctx = self.cli_context(cli, ui)?;
                let cmd = super::check_gmsh::CheckGmshCommand::new(ctx, args.clone());
                cmd.execute(ui)
            }
            Commands::CheckQgis(args) => {
                let ctx = self.cli_context(cli, ui)?;
                let cmd = super::check_qgis::CheckQgisCommand::new(ctx, args.clone());
                cmd.execute(ui)
            }
            Commands::CheckEnv(args) => {
                let ctx = self.cli_context(cli, ui)?;
                let cmd = super::check_env::CheckEnvCommand::new(ctx, args.clone());
                cmd.execute(ui)
            }
            Commands::EggInfo(args) => {
                let ctx = self.cli_context(cli, ui)?;
                let cmd = super::egg_info::EggInfoCommand::new(ctx, args.clone());
                cmd.execute(ui)
            }
            Commands::Build(args) => {
                let ctx = self.cli_context(cli, ui)?;
                let cmd = super::build::BuildCommand::new(ctx, args.clone());
                cmd.execute(ui)
            }
            // Needs no project configuration.
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
