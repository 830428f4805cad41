//! Locating executables on PATH.
//!
//! The host facility differs per platform (`which` on POSIX, `where.exe` on
//! Windows). [`platform_lookup`] picks the implementation once; callers only
//! see the [`ExecutableLookup`] trait, which also lets tests substitute a
//! fake.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::Result;

use super::platform::Platform;

/// Capability to find a tool's executable on the host's PATH.
pub trait ExecutableLookup {
    /// Name of the facility, for log and error messages.
    fn facility(&self) -> &str;

    /// Locate `tool`. `Ok(None)` means the facility reported it missing.
    fn locate(&self, tool: &str) -> Result<Option<PathBuf>>;
}

/// POSIX `which <name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichLookup;

/// Windows `where.exe <name>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhereLookup;

impl ExecutableLookup for WhichLookup {
    fn facility(&self) -> &str {
        Platform::Posix.lookup_program()
    }

    fn locate(&self, tool: &str) -> Result<Option<PathBuf>> {
        run_lookup(self.facility(), tool)
    }
}

impl ExecutableLookup for WhereLookup {
    fn facility(&self) -> &str {
        Platform::Windows.lookup_program()
    }

    fn locate(&self, tool: &str) -> Result<Option<PathBuf>> {
        run_lookup(self.facility(), tool)
    }
}

/// Select the lookup facility for the current platform.
pub fn platform_lookup() -> Box<dyn ExecutableLookup> {
    match Platform::current() {
        Platform::Posix => Box::new(WhichLookup),
        Platform::Windows => Box::new(WhereLookup),
    }
}

fn run_lookup(program: &str, tool: &str) -> Result<Option<PathBuf>> {
    tracing::debug!("Looking up '{}' with {}", tool, program);

    let output = Command::new(program)
        .arg(tool)
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        tracing::debug!(
            "{} {} exited with {:?}",
            program,
            tool,
            output.status.code()
        );
        return Ok(None);
    }

    Ok(first_path(&String::from_utf8_lossy(&output.stdout)))
}

/// Take the first non-empty line of lookup output as a path.
///
/// `where.exe` lists every match, one per line; the first wins.
pub fn first_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}
