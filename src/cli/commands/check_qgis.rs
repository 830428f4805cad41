//! The `check-qgis` command.

use std::path::Path;

use crate::checks::{PythonRuntime, QgisCheck, ToolkitRuntime, VerificationResult};
use crate::cli::args::CheckQgisArgs;
use crate::context::DistributionContext;
use crate::error::Result;
use crate::shell::{platform_lookup, ExecutableLookup};
use crate::ui::UserInterface;

use super::check_gmsh::describe;
use super::dispatcher::{Command, CommandResult};

/// Locates QGIS and loads its Python API headless.
pub struct CheckQgisCommand {
    ctx: DistributionContext,
    args: CheckQgisArgs,
    lookup: Box<dyn ExecutableLookup>,
    runtime: Box<dyn ToolkitRuntime>,
}

impl CheckQgisCommand {
    /// Create the command using the host's PATH lookup and the configured
    /// Python interpreter.
    pub fn new(ctx: DistributionContext, args: CheckQgisArgs) -> Self {
        let runtime = PythonRuntime::new(&ctx.python, ctx.timeout);
        Self {
            ctx,
            args,
            lookup: platform_lookup(),
            runtime: Box::new(runtime),
        }
    }

    /// Replace the PATH lookup.
    pub fn with_lookup(mut self, lookup: Box<dyn ExecutableLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Replace the toolkit runtime.
    pub fn with_runtime(mut self, runtime: Box<dyn ToolkitRuntime>) -> Self {
        self.runtime = runtime;
        self
    }
}

impl Command for CheckQgisCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = self.ctx.clone();
        check_qgis(
            self.lookup.as_ref(),
            self.runtime.as_ref(),
            self.args.qgis_path.as_deref(),
            &mut ctx,
            ui,
        )?;
        Ok(CommandResult::success())
    }
}

/// Run the QGIS check behind a spinner.
pub(super) fn check_qgis(
    lookup: &dyn ExecutableLookup,
    runtime: &dyn ToolkitRuntime,
    override_path: Option<&Path>,
    ctx: &mut DistributionContext,
    ui: &mut dyn UserInterface,
) -> Result<VerificationResult> {
    let mut spinner = ui.start_spinner("Checking qgis...");
    match QgisCheck::new(lookup, runtime).run(override_path, ctx) {
        Ok(result) => {
            spinner.finish_success(&describe(&result));
            Ok(result)
        }
        Err(e) => {
            spinner.finish_error("qgis check failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::MockRuntime;
    use crate::error::SetupError;
    use crate::shell::MockLookup;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn command(
        ctx: DistributionContext,
        args: CheckQgisArgs,
        runtime: MockRuntime,
    ) -> CheckQgisCommand {
        CheckQgisCommand::new(ctx, args)
            .with_lookup(Box::new(MockLookup::new()))
            .with_runtime(Box::new(runtime))
    }

    #[test]
    fn missing_python_package_is_toolkit_absent() {
        let cmd = command(
            DistributionContext::default(),
            CheckQgisArgs::default(),
            MockRuntime::new(),
        );
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(matches!(err, SetupError::ToolkitAbsent { .. }));
        assert_eq!(ui.spinners(), ["Checking qgis..."]);
    }

    #[test]
    fn override_with_version_succeeds() {
        let temp = TempDir::new().unwrap();
        let args = CheckQgisArgs {
            qgis_path: Some(temp.path().to_path_buf()),
        };
        let runtime = MockRuntime::new().with_attribute("Qgis.QGIS_VERSION", "3.28.4-Firenze");
        let cmd = command(DistributionContext::default(), args, runtime);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
    }

    #[test]
    fn toolkit_without_version_is_not_functional() {
        let temp = TempDir::new().unwrap();
        let args = CheckQgisArgs {
            qgis_path: Some(temp.path().to_path_buf()),
        };
        let cmd = command(DistributionContext::default(), args, MockRuntime::new());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, SetupError::ToolNotFunctional { .. }));
    }
}
