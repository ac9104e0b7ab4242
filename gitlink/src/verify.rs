//! @ai:module:intent Check that submodule pointer bumps ship with updated RESULTS.md files
//! @ai:module:layer application
//! @ai:module:public_api verify_range, VerifyConfig, VerifyReport, Violation
//! @ai:module:depends_on diff, git, error
//! @ai:module:stateless true

use crate::diff::GitlinkChange;
use crate::error::Result;
use crate::git::{GitBackend, RevisionRange};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the committed results file for every rule/language pair.
pub const RESULTS_FILE: &str = "RESULTS.md";

/// @ai:intent Repository layout the verifier checks against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    pub benchmarks_dir: String,
    pub rules_dir: String,
    pub metrics_path: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            benchmarks_dir: "benchmarks".to_string(),
            rules_dir: "rules".to_string(),
            metrics_path: "_metrics".to_string(),
        }
    }
}

impl VerifyConfig {
    /// @ai:intent Extract the rule name from a gitlink under the benchmarks root
    /// @ai:effects pure
    pub fn rule_for(&self, path: &str) -> Option<String> {
        let prefix = format!("{}/", self.benchmarks_dir.trim_end_matches('/'));
        path.strip_prefix(&prefix)
            .filter(|rule| !rule.is_empty())
            .map(str::to_string)
    }

    /// @ai:intent Pattern matching `rules/{rule}/**/RESULTS.md`, any rule when `rule` is None
    /// @ai:effects pure
    fn results_pattern(&self, rule: Option<&str>) -> Result<Regex> {
        let rules = regex::escape(self.rules_dir.trim_end_matches('/'));
        let rule = match rule {
            Some(rule) => regex::escape(rule),
            None => "[^/]+".to_string(),
        };
        let file = regex::escape(RESULTS_FILE);
        Ok(Regex::new(&format!("^{rules}/{rule}/(?:.*/)?{file}$"))?)
    }

    fn results_glob(&self, rule: Option<&str>) -> String {
        format!(
            "{}/{}/**/{}",
            self.rules_dir.trim_end_matches('/'),
            rule.unwrap_or("*"),
            RESULTS_FILE
        )
    }
}

/// @ai:intent A submodule bump without the matching results update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub gitlink: String,
    pub expected: String,
    pub message: String,
}

/// @ai:intent Outcome of verifying one revision range
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyReport {
    pub gitlinks: Vec<String>,
    pub changed_paths: usize,
    pub violations: Vec<Violation>,
}

impl VerifyReport {
    /// @ai:intent Check if verification passed (no violations)
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// @ai:intent Verify every gitlink change in the range is paired with a results update
/// @ai:post all violations are collected, never fail-fast
/// @ai:effects io
pub fn verify_range(
    git: &impl GitBackend,
    range: &RevisionRange,
    config: &VerifyConfig,
) -> Result<VerifyReport> {
    let gitlinks = git.gitlinks(range)?;
    if gitlinks.is_empty() {
        return Ok(VerifyReport::default());
    }

    let changed = git.changed_paths(range)?;
    let violations = check_changes(&gitlinks.changes, &changed, config)?;

    Ok(VerifyReport {
        gitlinks: gitlinks.changes.into_iter().map(|c| c.path).collect(),
        changed_paths: changed.len(),
        violations,
    })
}

/// @ai:intent Pair gitlink changes with changed results files
/// @ai:effects pure
pub fn check_changes(
    gitlinks: &[GitlinkChange],
    changed: &BTreeSet<String>,
    config: &VerifyConfig,
) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();

    for gitlink in gitlinks {
        let rule = if gitlink.path == config.metrics_path {
            None
        } else if let Some(rule) = config.rule_for(&gitlink.path) {
            Some(rule)
        } else {
            continue;
        };

        let pattern = config.results_pattern(rule.as_deref())?;
        if changed.iter().any(|p| pattern.is_match(p)) {
            continue;
        }

        let expected = config.results_glob(rule.as_deref());
        violations.push(Violation {
            gitlink: gitlink.path.clone(),
            message: format!(
                "Changed {} submodule but did not update any {}",
                gitlink.path, expected
            ),
            expected,
        });
    }

    Ok(violations)
}
