//! Thin wrapper over the `git` command line.
//!
//! Calls the Git commands directly instead of pulling in a libgit binding,
//! so the tool works anywhere a plain `git` is installed.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::exec;

/// Handle to the repository containing the main document.
pub struct GitRepo {
    root: PathBuf,
    initial_rev: String,
}

impl GitRepo {
    /// Locate the repository that contains `dir` and remember the currently
    /// checked-out ref so it can be restored later.
    ///
    /// Fails when the working tree is dirty: switching revisions under
    /// uncommitted or untracked files would lose work.
    pub fn discover(dir: &Path) -> Result<Self> {
        let root = PathBuf::from(
            exec::capture("git", &["rev-parse", "--show-toplevel"], dir)
                .context("not inside a Git repository")?,
        );
        check_clean(&root)?;
        let initial_rev = current_rev(&root)?;
        Ok(Self { root, initial_rev })
    }

    /// The ref (branch name or commit hash) checked out at discovery time.
    pub fn initial_rev(&self) -> &str {
        &self.initial_rev
    }

    /// Check out the given revision.
    pub fn checkout(&self, revision: &str) -> Result<()> {
        info!(revision, "checking out");
        self.git(&["checkout", revision]).map(|_| ())
    }

    /// Return to the revision that was checked out at discovery.
    pub fn restore(&self) -> Result<()> {
        self.checkout(&self.initial_rev)
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        exec::capture("git", args, &self.root)
    }
}

/// Fail when the working tree has uncommitted changes or untracked files.
fn check_clean(root: &Path) -> Result<()> {
    if exec::capture("git", &["diff-index", "--quiet", "HEAD", "--"], root).is_err() {
        bail!("uncommitted changes present; commit or reset and try again");
    }

    let untracked = exec::capture(
        "git",
        &["ls-files", "--exclude-standard", "--others"],
        root,
    )?;
    if !untracked.is_empty() {
        bail!(
            "untracked files present in {}:\n\n{}\n\nAdd and commit or delete them and try again",
            root.display(),
            untracked
        );
    }
    Ok(())
}

/// The current branch name, or the commit hash for a detached HEAD.
fn current_rev(root: &Path) -> Result<String> {
    match exec::capture(
        "git",
        &["symbolic-ref", "--quiet", "--short", "HEAD"],
        root,
    ) {
        Ok(branch) => Ok(branch),
        Err(_) => exec::capture("git", &["rev-parse", "HEAD"], root),
    }
}
