//! @ai:module:intent Read-only access to the git CLI for diff queries
//! @ai:module:layer infrastructure
//! @ai:module:public_api GitBackend, GitCli, MockGit, RevisionRange
//! @ai:module:stateless true

use crate::diff::{gitlink_changes, GitlinkDiff};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

/// @ai:intent A base/head pair of revision identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    pub base: String,
    pub head: String,
}

impl RevisionRange {
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: head.into(),
        }
    }

    /// @ai:intent Build a range only when both sides are present and non-blank
    /// @ai:effects pure
    pub fn from_parts(base: Option<&str>, head: Option<&str>) -> Option<Self> {
        let base = base.map(str::trim).filter(|s| !s.is_empty())?;
        let head = head.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self::new(base, head))
    }
}

impl std::fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.base, self.head)
    }
}

/// @ai:intent Trait for the version-control queries this tool depends on
pub trait GitBackend {
    /// @ai:intent Raw tree diff between two revisions
    fn raw_diff(&self, range: &RevisionRange) -> Result<String>;

    /// @ai:intent Every file path changed between two revisions
    fn changed_paths(&self, range: &RevisionRange) -> Result<BTreeSet<String>>;

    /// @ai:intent Fail when the working tree has uncommitted differences
    fn assert_clean(&self) -> Result<()>;

    /// @ai:intent Submodule pointer changes between two revisions
    /// @ai:effects io
    fn gitlinks(&self, range: &RevisionRange) -> Result<GitlinkDiff> {
        let raw = self.raw_diff(range)?;
        Ok(gitlink_changes(&raw))
    }
}

/// @ai:intent Git backend that shells out to the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// @ai:intent Create a backend operating on the given work tree
    /// @ai:effects pure
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// @ai:intent Run git and return stdout, failing on nonzero exit
    /// @ai:effects io
    fn output(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("Running {} in {}", command, self.repo.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .output()
            .map_err(|source| Error::GitSpawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostics = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(Error::GitFailed {
                command,
                code: output.status.code(),
                diagnostics,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitBackend for GitCli {
    fn raw_diff(&self, range: &RevisionRange) -> Result<String> {
        self.output(&["diff", "--raw", "--no-renames", &range.base, &range.head])
    }

    fn changed_paths(&self, range: &RevisionRange) -> Result<BTreeSet<String>> {
        let raw = self.output(&["diff", "--name-only", "--no-renames", &range.base, &range.head])?;
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn assert_clean(&self) -> Result<()> {
        self.output(&["diff", "--exit-code"]).map(|_| ())
    }
}

/// @ai:intent Git backend returning canned output for tests
#[derive(Debug, Clone, Default)]
pub struct MockGit {
    raw: String,
    paths: BTreeSet<String>,
    dirty: Option<String>,
    broken: Option<String>,
}

impl MockGit {
    /// @ai:intent Create a mock with a fixed raw diff and changed path list
    /// @ai:effects pure
    pub fn new(raw: impl Into<String>, paths: &[&str]) -> Self {
        Self {
            raw: raw.into(),
            paths: paths.iter().map(|p| p.to_string()).collect(),
            dirty: None,
            broken: None,
        }
    }

    /// @ai:intent Make `assert_clean` fail with the given diff text
    pub fn with_dirty_tree(mut self, diff: impl Into<String>) -> Self {
        self.dirty = Some(diff.into());
        self
    }

    /// @ai:intent Make diff queries fail as if git rejected the revisions
    pub fn with_failing_diff(mut self, diagnostics: impl Into<String>) -> Self {
        self.broken = Some(diagnostics.into());
        self
    }
}

impl GitBackend for MockGit {
    fn raw_diff(&self, range: &RevisionRange) -> Result<String> {
        match &self.broken {
            Some(diagnostics) => Err(Error::GitFailed {
                command: format!("git diff --raw --no-renames {} {}", range.base, range.head),
                code: Some(128),
                diagnostics: diagnostics.clone(),
            }),
            None => Ok(self.raw.clone()),
        }
    }

    fn changed_paths(&self, _range: &RevisionRange) -> Result<BTreeSet<String>> {
        Ok(self.paths.clone())
    }

    fn assert_clean(&self) -> Result<()> {
        match &self.dirty {
            Some(diff) => Err(Error::GitFailed {
                command: "git diff --exit-code".to_string(),
                code: Some(1),
                diagnostics: diff.clone(),
            }),
            None => Ok(()),
        }
    }
}
