//! The `egg-info` command.

use std::path::{Path, PathBuf};

use crate::cli::args::EggInfoArgs;
use crate::context::DistributionContext;
use crate::error::Result;
use crate::metadata::write_all;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Runs every metadata writer against the package metadata directory.
pub struct EggInfoCommand {
    ctx: DistributionContext,
    args: EggInfoArgs,
}

impl EggInfoCommand {
    pub fn new(ctx: DistributionContext, args: EggInfoArgs) -> Self {
        Self { ctx, args }
    }

    /// Directory the artifacts go to.
    pub fn egg_base(&self) -> PathBuf {
        egg_base(&self.ctx, self.args.egg_base.as_deref())
    }
}

impl Command for EggInfoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        write_metadata(&self.ctx, &self.egg_base(), ui)?;
        Ok(CommandResult::success())
    }
}

/// `requested`, or the context's default metadata directory.
pub(super) fn egg_base(ctx: &DistributionContext, requested: Option<&Path>) -> PathBuf {
    requested
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ctx.default_egg_base())
}

/// Write all artifacts and list them.
pub(super) fn write_metadata(
    ctx: &DistributionContext,
    egg_base: &Path,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let written = write_all(ctx, egg_base)?;
    if written.is_empty() {
        ui.message(&format!("No metadata to write to {}", egg_base.display()));
        return Ok(());
    }

    ui.success(&format!(
        "Wrote {} metadata file(s) to {}",
        written.len(),
        egg_base.display()
    ));
    if ui.output_mode().shows_details() {
        for path in &written {
            if let Some(name) = path.file_name() {
                ui.field("wrote", &name.to_string_lossy());
            }
        }
    }
    Ok(())
}
