//! The `check-gmsh` command.

use crate::checks::{GmshCheck, VerificationResult};
use crate::cli::args::CheckGmshArgs;
use crate::context::DistributionContext;
use crate::error::Result;
use crate::shell::{platform_lookup, ExecutableLookup};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Locates gmsh and runs `gmsh --version`.
pub struct CheckGmshCommand {
    ctx: DistributionContext,
    args: CheckGmshArgs,
    lookup: Box<dyn ExecutableLookup>,
}

impl CheckGmshCommand {
    /// Create the command using the host's PATH lookup.
    pub fn new(ctx: DistributionContext, args: CheckGmshArgs) -> Self {
        Self {
            ctx,
            args,
            lookup: platform_lookup(),
        }
    }

    /// Replace the PATH lookup.
    pub fn with_lookup(mut self, lookup: Box<dyn ExecutableLookup>) -> Self {
        self.lookup = lookup;
        self
    }
}

impl Command for CheckGmshCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = self.ctx.clone();
        check_gmsh(
            self.lookup.as_ref(),
            self.args.gmsh_bin_path.as_deref(),
            &mut ctx,
            ui,
        )?;
        Ok(CommandResult::success())
    }
}

/// Run the gmsh check behind a spinner.
pub(super) fn check_gmsh(
    lookup: &dyn ExecutableLookup,
    override_path: Option<&std::path::Path>,
    ctx: &mut DistributionContext,
    ui: &mut dyn UserInterface,
) -> Result<VerificationResult> {
    let mut spinner = ui.start_spinner("Checking gmsh...");
    match GmshCheck::new(lookup).run(override_path, ctx) {
        Ok(result) => {
            spinner.finish_success(&describe(&result));
            Ok(result)
        }
        Err(e) => {
            spinner.finish_error("gmsh check failed");
            Err(e)
        }
    }
}

/// One-line summary of a found tool, e.g. `gmsh 4.11.1 (/usr/bin/gmsh)`.
pub(super) fn describe(result: &VerificationResult) -> String {
    let version = result.version.as_deref().unwrap_or("unknown version");
    match &result.resolved_path {
        Some(path) => format!("{} {} ({})", result.tool, version, path.display()),
        None => format!("{} {}", result.tool, version),
    }
}
