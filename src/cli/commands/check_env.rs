//! The `check-env` command.
//!
//! A preflight that runs both tool checks and reports every outcome instead
//! of stopping at the first failure. Nothing is written.

use crate::checks::{PythonRuntime, ToolkitRuntime, VerificationResult, GMSH, QGIS};
use crate::cli::args::CheckEnvArgs;
use crate::context::DistributionContext;
use crate::error::{Result, SetupError};
use crate::shell::{platform_lookup, ExecutableLookup};
use crate::ui::{OutputMode, UserInterface};

use super::check_gmsh::check_gmsh;
use super::check_qgis::check_qgis;
use super::dispatcher::{Command, CommandResult};

/// Checks gmsh and QGIS and reports both.
pub struct CheckEnvCommand {
    ctx: DistributionContext,
    args: CheckEnvArgs,
    lookup: Box<dyn ExecutableLookup>,
    runtime: Box<dyn ToolkitRuntime>,
}

impl CheckEnvCommand {
    pub fn new(ctx: DistributionContext, args: CheckEnvArgs) -> Self {
        let runtime = PythonRuntime::new(&ctx.python, ctx.timeout);
        Self {
            ctx,
            args,
            lookup: platform_lookup(),
            runtime: Box::new(runtime),
        }
    }

    pub fn with_lookup(mut self, lookup: Box<dyn ExecutableLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_runtime(mut self, runtime: Box<dyn ToolkitRuntime>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Run both checks, turning failures into `missing` results.
    pub fn results(&self, ui: &mut dyn UserInterface) -> Vec<VerificationResult> {
        let mut ctx = self.ctx.clone();

        let gmsh = check_gmsh(self.lookup.as_ref(), None, &mut ctx, ui)
            .unwrap_or_else(|e| report_missing(ui, GMSH, &e));
        let qgis = check_qgis(
            self.lookup.as_ref(),
            self.runtime.as_ref(),
            None,
            &mut ctx,
            ui,
        )
        .unwrap_or_else(|e| report_missing(ui, QGIS, &e));

        vec![gmsh, qgis]
    }
}

fn report_missing(ui: &mut dyn UserInterface, tool: &str, err: &SetupError) -> VerificationResult {
    ui.warning(&err.to_string());
    VerificationResult::missing(tool)
}

impl Command for CheckEnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Keep stdout clean for the JSON document.
        let previous = ui.output_mode();
        if self.args.json {
            ui.set_output_mode(OutputMode::Silent);
        }
        let results = self.results(ui);
        ui.set_output_mode(previous);

        if self.args.json {
            let json = serde_json::to_string_pretty(&results).map_err(anyhow::Error::from)?;
            println!("{}", json);
        } else {
            ui.show_header("Environment");
            for result in &results {
                let status = match (&result.version, &result.resolved_path) {
                    (Some(version), Some(path)) => format!("{} ({})", version, path.display()),
                    _ => "not found".to_string(),
                };
                ui.field(&result.tool, &status);
            }
        }

        if results.iter().all(|r| r.found) {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::MockRuntime;
    use crate::shell::MockLookup;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn reports_both_tools_missing() {
        let cmd = CheckEnvCommand::new(DistributionContext::default(), CheckEnvArgs::default())
            .with_lookup(Box::new(MockLookup::new()))
            .with_runtime(Box::new(MockRuntime::new()));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.field_value("gmsh"), Some("not found"));
        assert_eq!(ui.field_value("qgis"), Some("not found"));
        assert!(ui.has_warning("gmsh"));
        assert!(ui.has_warning("qgis"));
    }

    #[test]
    fn qgis_found_from_context() {
        let temp = TempDir::new().unwrap();
        let ctx = DistributionContext {
            qgis_path: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let cmd = CheckEnvCommand::new(ctx, CheckEnvArgs::default())
            .with_lookup(Box::new(MockLookup::new()))
            .with_runtime(Box::new(
                MockRuntime::new().with_attribute("QGis.QGIS_VERSION", "2.18.28"),
            ));
        let mut ui = MockUI::new();

        let results = cmd.results(&mut ui);

        assert!(!results[0].found);
        assert!(results[1].found);
        assert_eq!(results[1].version.as_deref(), Some("2.18.28"));
        assert_eq!(results[1].version_number.as_deref(), Some("2.18.28"));
        assert_eq!(results[1].resolved_path.as_deref(), Some(temp.path()));
    }

    #[test]
    fn json_mode_restores_output_mode() {
        let args = CheckEnvArgs { json: true };
        let cmd = CheckEnvCommand::new(DistributionContext::default(), args)
            .with_lookup(Box::new(MockLookup::new()))
            .with_runtime(Box::new(MockRuntime::new()));
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert!(ui.fields().is_empty());
    }
}
