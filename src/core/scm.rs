//! Source-control queries behind a trait seam.
//!
//! Every query is best-effort: a missing binary, a non-zero exit, or empty
//! output degrades to `None` so the resolver's fallback chains stay explicit
//! data flow instead of swallowed errors.

use std::path::{Path, PathBuf};

use crate::utils::command;

pub trait Scm {
    /// Current branch name, trimmed of line terminators.
    fn current_branch(&self) -> Option<String>;

    /// Raw newline-delimited remote heads listing (`refs/heads/...` lines).
    fn remote_heads(&self) -> Option<String>;

    /// Number of commits reachable from `reference`, as the tool prints it.
    fn commit_count(&self, reference: &str) -> Option<String>;
}

/// `git` subprocess implementation, operating in a fixed working directory.
pub struct GitScm {
    workdir: PathBuf,
}

impl GitScm {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Scm for GitScm {
    fn current_branch(&self) -> Option<String> {
        command::run_in_optional(&self.workdir, "git", &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn remote_heads(&self) -> Option<String> {
        command::run_in_optional(&self.workdir, "git", &["ls-remote", "--heads", "origin"])
    }

    fn commit_count(&self, reference: &str) -> Option<String> {
        command::run_in_optional(&self.workdir, "git", &["rev-list", "--count", reference])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn current_branch_is_none_outside_a_checkout() {
        let dir = tempdir().unwrap();
        let scm = GitScm::new(dir.path());
        assert_eq!(scm.current_branch(), None);
    }

    #[test]
    fn commit_count_is_none_for_unknown_ref() {
        let dir = tempdir().unwrap();
        let scm = GitScm::new(dir.path());
        assert_eq!(scm.commit_count("no-such-ref"), None);
    }
}
