//! @ai:module:intent Parse `git diff --raw` output and extract submodule pointer changes
//! @ai:module:layer domain
//! @ai:module:public_api parse_raw_diff, parse_raw_line, gitlink_changes, DiffEntry, GitlinkChange, GitlinkDiff, ParsedLine, SkipReason
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tree entry mode git uses for submodule pointers.
pub const SUBMODULE_MODE: &str = "160000";

/// @ai:intent A single well-formed entry of a raw tree diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub old_mode: String,
    pub new_mode: String,
    pub old_object: String,
    pub new_object: Option<String>,
    pub status: Option<String>,
    pub path: String,
}

impl DiffEntry {
    /// @ai:intent Check whether both sides of the entry are submodule pointers
    /// @ai:effects pure
    pub fn is_gitlink(&self) -> bool {
        self.old_mode == SUBMODULE_MODE && self.new_mode == SUBMODULE_MODE
    }
}

/// @ai:intent Why a raw diff line was not turned into an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No tab separates the metadata from the path.
    MissingTab,
    /// Fewer than three whitespace separated metadata fields.
    TooFewFields,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingTab => write!(f, "missing tab before path"),
            SkipReason::TooFewFields => write!(f, "fewer than three metadata fields"),
        }
    }
}

/// @ai:intent Outcome of parsing one raw diff line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Valid(DiffEntry),
    Skipped { line: String, reason: SkipReason },
}

/// @ai:intent A repository path whose submodule pointer changed between two revisions
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GitlinkChange {
    pub path: String,
}

impl GitlinkChange {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// @ai:intent Submodule pointer changes plus the raw lines that could not be parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitlinkDiff {
    pub changes: Vec<GitlinkChange>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl GitlinkDiff {
    /// @ai:intent Check whether a path is among the changed submodule pointers
    /// @ai:effects pure
    pub fn contains(&self, path: &str) -> bool {
        self.changes.iter().any(|c| c.path == path)
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// @ai:intent Parse one line of `git diff --raw` output
/// @ai:effects pure
pub fn parse_raw_line(line: &str) -> ParsedLine {
    let Some((meta, path)) = line.split_once('\t') else {
        return ParsedLine::Skipped {
            line: line.to_string(),
            reason: SkipReason::MissingTab,
        };
    };

    let fields: Vec<&str> = meta.split_whitespace().collect();
    if fields.len() < 3 {
        return ParsedLine::Skipped {
            line: line.to_string(),
            reason: SkipReason::TooFewFields,
        };
    }

    ParsedLine::Valid(DiffEntry {
        old_mode: fields[0].trim_start_matches(':').to_string(),
        new_mode: fields[1].to_string(),
        old_object: fields[2].to_string(),
        new_object: fields.get(3).map(|s| s.to_string()),
        status: fields.get(4).map(|s| s.to_string()),
        path: path.trim().to_string(),
    })
}

/// @ai:intent Parse every line of `git diff --raw` output
/// @ai:effects pure
pub fn parse_raw_diff(raw: &str) -> Vec<ParsedLine> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_raw_line)
        .collect()
}

/// @ai:intent Keep only entries that are submodule pointers on both sides
/// @ai:post changes are unique and sorted by path
/// @ai:effects pure
pub fn gitlink_changes(raw: &str) -> GitlinkDiff {
    let mut paths = BTreeSet::new();
    let mut skipped = Vec::new();

    for parsed in parse_raw_diff(raw) {
        match parsed {
            ParsedLine::Valid(entry) if entry.is_gitlink() => {
                paths.insert(entry.path);
            }
            ParsedLine::Valid(_) => {}
            ParsedLine::Skipped { line, reason } => {
                tracing::debug!("Skipping raw diff line ({}): {:?}", reason, line);
                skipped.push((line, reason));
            }
        }
    }

    GitlinkDiff {
        changes: paths.into_iter().map(GitlinkChange::new).collect(),
        skipped,
    }
}
