//! Git commit identification for the git sha key artifact.

use std::path::Path;
use std::process::{Command, Stdio};

/// Written instead of a commit hash when none can be obtained.
pub const NO_GIT_SHA_KEY: &str = "Could not obtain git sha key.";

/// Appended to the commit hash when tracked files have uncommitted changes.
///
/// The wording, misspelling included, is what existing packages already ship.
pub const DIRTY_ANNOTATION: &str = " + uncommited changes (built from dirty repository).";

/// Commit hash of the repository rooted at `repo`, never failing.
///
/// Only `repo` itself is considered; parent directories are not searched.
/// Without git, outside a repository, or before the first commit the
/// placeholder [`NO_GIT_SHA_KEY`] is returned.
pub fn git_sha_key(repo: &Path) -> String {
    match head_sha(repo) {
        Some(sha) if is_dirty(repo) => format!("{}{}", sha, DIRTY_ANNOTATION),
        Some(sha) => sha,
        None => {
            tracing::debug!("No git commit found at {}", repo.display());
            NO_GIT_SHA_KEY.to_string()
        }
    }
}

fn head_sha(repo: &Path) -> Option<String> {
    git(repo, &["rev-parse", "--verify", "HEAD"]).filter(|sha| !sha.is_empty())
}

fn is_dirty(repo: &Path) -> bool {
    git(repo, &["status", "--porcelain", "--untracked-files=no"])
        .map(|out| !out.is_empty())
        .unwrap_or(false)
}

/// Run git in `repo`, returning trimmed stdout on success.
fn git(repo: &Path, args: &[&str]) -> Option<String> {
    let repo = repo.canonicalize().ok()?;
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(&repo)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .stdin(Stdio::null());
    if let Some(parent) = repo.parent() {
        cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }

    let output = cmd.output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
