//! Metadata artifact writers.
//!
//! Every writer has the same shape: it reads one field of the
//! [`DistributionContext`] and serialises it to `filename`, or does nothing
//! when the field is disabled or empty.

use std::fs;
use std::path::Path;

use crate::context::DistributionContext;
use crate::error::Result;

use super::git::git_sha_key;

/// Signature shared by all metadata writers.
///
/// `basename` is the artifact's file name, `filename` its full output path.
/// Returns whether the artifact was written.
pub type MetadataWriter = fn(&DistributionContext, &str, &Path) -> Result<bool>;

/// Write `data` to `filename`, or remove a stale `filename` when there is
/// nothing to write. Returns whether `data` was written.
pub fn write_or_delete(what: &str, filename: &Path, data: Option<&str>) -> Result<bool> {
    match data.filter(|d| !d.is_empty()) {
        Some(data) => {
            tracing::info!("writing {} to {}", what, filename.display());
            if let Some(parent) = filename.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(filename, data)?;
            Ok(true)
        }
        None => {
            if filename.exists() {
                tracing::info!("deleting {} from {}", what, filename.display());
                fs::remove_file(filename)?;
            }
            Ok(false)
        }
    }
}

/// Artifact name without its extension, used in log lines.
fn argname(basename: &str) -> &str {
    Path::new(basename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(basename)
}

/// Record the repository's commit hash when `include_git_sha_key` is set.
///
/// Never fails because of git: outside a repository a placeholder is
/// written instead.
pub fn write_git_sha_key(
    ctx: &DistributionContext,
    basename: &str,
    filename: &Path,
) -> Result<bool> {
    if !ctx.include_git_sha_key {
        return Ok(false);
    }
    let key = git_sha_key(&ctx.project_root);
    write_or_delete(argname(basename), filename, Some(&key))
}

/// Copy the licence statement when `include_full_license` is set.
pub fn write_full_license(
    ctx: &DistributionContext,
    basename: &str,
    filename: &Path,
) -> Result<bool> {
    if !ctx.include_full_license {
        return Ok(false);
    }
    let statement = fs::read_to_string(ctx.project_path(&ctx.license_file))?;
    write_or_delete(argname(basename), filename, Some(&statement))
}

/// Copy the author list when `include_author_ids` is set.
pub fn write_author_ids(
    ctx: &DistributionContext,
    basename: &str,
    filename: &Path,
) -> Result<bool> {
    if !ctx.include_author_ids {
        return Ok(false);
    }
    let authors = fs::read_to_string(ctx.project_path(&ctx.authors_file))?;
    write_or_delete(argname(basename), filename, Some(&authors))
}

/// Record the verified gmsh binary path.
pub fn write_gmsh_bin_path(
    ctx: &DistributionContext,
    basename: &str,
    filename: &Path,
) -> Result<bool> {
    let path = ctx.gmsh_bin_path.as_ref().map(|p| p.to_string_lossy());
    write_or_delete(argname(basename), filename, path.as_deref())
}

/// Record the verified QGIS installation root.
pub fn write_qgis_path(
    ctx: &DistributionContext,
    basename: &str,
    filename: &Path,
) -> Result<bool> {
    let path = ctx.qgis_path.as_ref().map(|p| p.to_string_lossy());
    write_or_delete(argname(basename), filename, path.as_deref())
}
