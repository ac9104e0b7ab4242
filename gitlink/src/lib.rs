//! @ai:module:intent Submodule pointer diffing and results consistency checks
//! @ai:module:layer infrastructure
//! @ai:module:public_api diff, error, git, output, verdict, verify
//! @ai:module:stateless true
//!
//! # Rules gitlink
//!
//! Reads `git diff --raw` between two revisions, keeps the entries that are
//! submodule pointers on both sides, and checks that every bumped benchmark
//! submodule comes with an updated `rules/<rule>/**/RESULTS.md`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rules_gitlink::{verify_range, GitCli, RevisionRange, VerifyConfig};
//!
//! let git = GitCli::new(".");
//! let range = RevisionRange::new("origin/main", "HEAD");
//! let report = verify_range(&git, &range, &VerifyConfig::default()).unwrap();
//! assert!(report.passed());
//! ```

pub mod diff;
pub mod error;
pub mod git;
pub mod output;
pub mod verdict;
pub mod verify;

pub use diff::{
    gitlink_changes, parse_raw_diff, parse_raw_line, DiffEntry, GitlinkChange, GitlinkDiff,
    ParsedLine, SkipReason, SUBMODULE_MODE,
};
pub use error::{Error, Result};
pub use git::{GitBackend, GitCli, MockGit, RevisionRange};
pub use output::{format_verify_report, to_json, OutputFormat};
pub use verdict::{run_verification, Verdict, VerifyStatus};
pub use verify::{check_changes, verify_range, VerifyConfig, VerifyReport, Violation, RESULTS_FILE};
