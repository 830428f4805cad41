//! The `build` command.
//!
//! The whole packaging pipeline: check gmsh, check QGIS, then write the
//! metadata artifacts, which record the verified tool locations. The first
//! failure aborts the run.

use crate::checks::{PythonRuntime, ToolkitRuntime};
use crate::cli::args::BuildArgs;
use crate::context::DistributionContext;
use crate::error::Result;
use crate::shell::{platform_lookup, ExecutableLookup};
use crate::ui::UserInterface;

use super::check_gmsh::check_gmsh;
use super::check_qgis::check_qgis;
use super::dispatcher::{Command, CommandResult};
use super::egg_info::{egg_base, write_metadata};

/// Runs both checks and the metadata writers.
pub struct BuildCommand {
    ctx: DistributionContext,
    args: BuildArgs,
    lookup: Box<dyn ExecutableLookup>,
    runtime: Box<dyn ToolkitRuntime>,
}

impl BuildCommand {
    pub fn new(ctx: DistributionContext, args: BuildArgs) -> Self {
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
}

impl Command for BuildCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = self.ctx.clone();
        ui.show_header(&format!("Building {}", ctx.name));

        check_gmsh(
            self.lookup.as_ref(),
            self.args.gmsh_bin_path.as_deref(),
            &mut ctx,
            ui,
        )?;
        check_qgis(
            self.lookup.as_ref(),
            self.runtime.as_ref(),
            self.args.qgis_path.as_deref(),
            &mut ctx,
            ui,
        )?;

        let target = egg_base(&ctx, self.args.egg_base.as_deref());
        write_metadata(&ctx, &target, ui)?;
        Ok(CommandResult::success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::checks::MockRuntime;
    use crate::error::SetupError;
    use crate::shell::MockLookup;
    use crate::ui::MockUI;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn fake_gmsh(dir: &Path) -> PathBuf {
        let bin = dir.join("bin");
        fs::create_dir_all(&bin).unwrap();
        let path = bin.join("gmsh");
        fs::write(&path, "#!/bin/sh\necho 4.11.1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn records_verified_tool_paths() {
        let temp = TempDir::new().unwrap();
        let gmsh = fake_gmsh(temp.path());
        let qgis_root = temp.path().join("qgis");
        fs::create_dir_all(&qgis_root).unwrap();
        let ctx = DistributionContext {
            name: "qmesh".into(),
            project_root: temp.path().to_path_buf(),
            ..Default::default()
        };
        let args = BuildArgs {
            gmsh_bin_path: Some(gmsh.parent().unwrap().to_path_buf()),
            qgis_path: Some(qgis_root.clone()),
            egg_base: None,
        };
        let cmd = BuildCommand::new(ctx, args)
            .with_lookup(Box::new(MockLookup::new()))
            .with_runtime(Box::new(
                MockRuntime::new().with_attribute("Qgis.QGIS_VERSION", "3.34.0-Prizren"),
            ));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        let egg = temp.path().join("qmesh.egg-info");
        assert_eq!(
            fs::read_to_string(egg.join("gmsh_bin_path.txt")).unwrap(),
            gmsh.to_string_lossy()
        );
        assert_eq!(
            fs::read_to_string(egg.join("qgis_path.txt")).unwrap(),
            qgis_root.to_string_lossy()
        );
        assert_eq!(ui.headers(), ["Building qmesh"]);
    }

    #[test]
    fn failed_check_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let gmsh = fake_gmsh(temp.path());
        let ctx = DistributionContext {
            name: "qmesh".into(),
            project_root: temp.path().to_path_buf(),
            include_git_sha_key: true,
            ..Default::default()
        };
        let args = BuildArgs {
            gmsh_bin_path: Some(gmsh),
            ..Default::default()
        };
        let cmd = BuildCommand::new(ctx, args)
            .with_lookup(Box::new(MockLookup::new()))
            .with_runtime(Box::new(MockRuntime::new()));
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();

        assert!(matches!(err, SetupError::ToolkitAbsent { .. }));
        assert!(!temp.path().join("qmesh.egg-info").exists());
    }
}
