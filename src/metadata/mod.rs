//! Distribution metadata artifacts.
//!
//! Writers serialise selected [`DistributionContext`] fields into the
//! package metadata directory (`<name>.egg-info` by default). Each one is
//! registered in [`WRITERS`] under the file name it produces.

pub mod git;
pub mod writers;

use std::path::{Path, PathBuf};

use crate::context::DistributionContext;
use crate::error::Result;

pub use git::{git_sha_key, DIRTY_ANNOTATION, NO_GIT_SHA_KEY};
pub use writers::{
    write_author_ids, write_full_license, write_git_sha_key, write_gmsh_bin_path,
    write_or_delete, write_qgis_path, MetadataWriter,
};

/// Artifact file names and the writer that produces each.
pub const WRITERS: &[(&str, MetadataWriter)] = &[
    ("git_sha_key.txt", write_git_sha_key),
    ("LICENSE", write_full_license),
    ("AUTHORS.md", write_author_ids),
    ("gmsh_bin_path.txt", write_gmsh_bin_path),
    ("qgis_path.txt", write_qgis_path),
];

/// Run every registered writer against `egg_base`.
///
/// Returns the artifacts written by this run, in registration order.
/// Stops at the first writer that fails.
pub fn write_all(ctx: &DistributionContext, egg_base: &Path) -> Result<Vec<PathBuf>> {
    tracing::debug!("Writing metadata to {}", egg_base.display());
    let mut written = Vec::new();
    for (basename, writer) in WRITERS {
        let filename = egg_base.join(basename);
        if writer(ctx, basename, &filename)? {
            written.push(filename);
        }
    }
    Ok(written)
}
