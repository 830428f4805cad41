//! gmsh mesh generator check.
//!
//! qmesh needs a functional gmsh binary. gmsh is not distributed through the
//! package index, so the user installs it separately and may keep several
//! versions side by side. The location can be given explicitly (a directory
//! containing `gmsh`, or the full path to the binary); otherwise it is looked
//! up on PATH. The check then runs `gmsh --version` and records the binary's
//! path in the [`DistributionContext`] for the `gmsh_bin_path.txt` artifact.

use std::path::{Path, PathBuf};

use crate::checks::path::validate_path;
use crate::checks::status::VerificationResult;
use crate::context::DistributionContext;
use crate::error::{Result, SetupError};
use crate::shell::{execute_captured, CommandOptions, ExecutableLookup, Platform};

/// Canonical tool name.
pub const GMSH: &str = "gmsh";

/// Attribute name reported when the gmsh location is not a path.
pub const GMSH_BIN_PATH_ATTR: &str = "gmsh_bin_path";

/// Locates and verifies a gmsh installation.
pub struct GmshCheck<'a> {
    lookup: &'a dyn ExecutableLookup,
    platform: Platform,
}

impl<'a> GmshCheck<'a> {
    /// Create a check using `lookup` to probe PATH.
    pub fn new(lookup: &'a dyn ExecutableLookup) -> Self {
        Self::with_platform(lookup, Platform::current())
    }

    /// Create a check for an explicit platform (binary naming differs).
    pub fn with_platform(lookup: &'a dyn ExecutableLookup, platform: Platform) -> Self {
        Self { lookup, platform }
    }

    /// Resolve and verify in one go.
    pub fn run(
        &self,
        override_path: Option<&Path>,
        ctx: &mut DistributionContext,
    ) -> Result<VerificationResult> {
        let location = self.resolve(override_path, ctx)?;
        self.verify(ctx, &location)
    }

    /// Determine the gmsh location without running it.
    ///
    /// Priority: `override_path`, then a location already held by `ctx`,
    /// then a PATH lookup. The result may be a directory or a full binary
    /// path; [`GmshCheck::verify`] handles both.
    pub fn resolve(
        &self,
        override_path: Option<&Path>,
        ctx: &DistributionContext,
    ) -> Result<PathBuf> {
        let candidate = match (override_path, &ctx.gmsh_bin_path) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path.clone(),
            (None, None) => self.detect()?,
        };

        validate_path(GMSH_BIN_PATH_ATTR, &candidate)?;
        Ok(candidate)
    }

    fn detect(&self) -> Result<PathBuf> {
        tracing::warn!(
            "No specification of gmsh path is present. Will try to detect a gmsh installation"
        );

        match self.lookup.locate(GMSH)? {
            Some(path) => {
                tracing::debug!("{} found gmsh at {}", self.lookup.facility(), path.display());
                Ok(path)
            }
            None => {
                let err = SetupError::ToolNotFound {
                    tool: GMSH.to_string(),
                    message: "Qmesh uses gmsh as a mesh generator, hence gmsh must be installed."
                        .to_string(),
                };
                tracing::error!("{}", err);
                Err(err)
            }
        }
    }

    /// Full path to the gmsh binary for `location`.
    ///
    /// A directory gets the binary file name appended, and the result must
    /// exist. Any other path is returned unchanged.
    pub fn binary_path(&self, location: &Path) -> Result<PathBuf> {
        if !location.is_dir() {
            return Ok(location.to_path_buf());
        }

        let binary = location.join(self.platform.binary_name(GMSH));
        if !binary.is_file() {
            return Err(not_functional(
                &binary,
                format!("Could not find gmsh at {}", binary.display()),
            ));
        }
        Ok(binary)
    }

    /// Run `<binary> --version` and record the binary in `ctx`.
    ///
    /// The version is the first line of combined stdout/stderr.
    pub fn verify(
        &self,
        ctx: &mut DistributionContext,
        location: &Path,
    ) -> Result<VerificationResult> {
        let binary = self.binary_path(location)?;

        let options = CommandOptions {
            timeout: ctx.timeout,
            ..Default::default()
        };
        let result = execute_captured(&binary, ["--version"], &options)
            .map_err(|e| not_functional(&binary, format!("could not be run: {}", e)))?;

        if result.timed_out {
            return Err(not_functional(
                &binary,
                format!("`--version` did not exit within {:?}", result.duration),
            ));
        }
        if !result.success {
            return Err(not_functional(
                &binary,
                format!("`--version` exited with code {:?}", result.exit_code),
            ));
        }

        let version = result.first_line().unwrap_or_default().to_string();
        tracing::info!("Found gmsh version {} at {}", version, binary.display());

        ctx.gmsh_bin_path = Some(binary.clone());
        Ok(VerificationResult::found(GMSH, version, &binary))
    }
}

fn not_functional(binary: &Path, message: String) -> SetupError {
    let err = SetupError::ToolNotFunctional {
        tool: GMSH.to_string(),
        path: binary.to_path_buf(),
        message,
    };
    tracing::error!("{}", err);
    err
}
