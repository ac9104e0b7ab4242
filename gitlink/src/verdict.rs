//! @ai:module:intent Map a verifier invocation to its message and process exit code
//! @ai:module:layer application
//! @ai:module:public_api run_verification, Verdict, VerifyStatus
//! @ai:module:depends_on git, verify, output
//! @ai:module:stateless true

use crate::git::{GitBackend, RevisionRange};
use crate::output::{format_verify_report, OutputFormat};
use crate::verify::{verify_range, VerifyConfig};

/// @ai:intent How a verifier invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStatus {
    Passed,
    Violations,
    Failed,
    MissingRange,
}

impl VerifyStatus {
    /// @ai:intent Process exit code for CI: 0 ok, 1 violations or error, 2 missing revisions
    /// @ai:effects pure
    pub fn exit_code(&self) -> u8 {
        match self {
            VerifyStatus::Passed => 0,
            VerifyStatus::Violations | VerifyStatus::Failed => 1,
            VerifyStatus::MissingRange => 2,
        }
    }
}

/// @ai:intent Status plus the text to print for it
#[derive(Debug, Clone)]
pub struct Verdict {
    pub status: VerifyStatus,
    pub message: String,
}

impl Verdict {
    /// Whether the message belongs on stdout rather than stderr.
    pub fn is_success(&self) -> bool {
        self.status == VerifyStatus::Passed
    }
}

/// @ai:intent Verify a range given as optional base/head identifiers
/// @ai:post status is MissingRange when either side is absent or blank
/// @ai:effects io
pub fn run_verification(
    base: Option<&str>,
    head: Option<&str>,
    git: &impl GitBackend,
    config: &VerifyConfig,
    format: OutputFormat,
) -> Verdict {
    let Some(range) = RevisionRange::from_parts(base, head) else {
        return Verdict {
            status: VerifyStatus::MissingRange,
            message: "Missing BASE_SHA/HEAD_SHA".to_string(),
        };
    };

    match verify_range(git, &range, config) {
        Ok(report) => Verdict {
            status: if report.passed() {
                VerifyStatus::Passed
            } else {
                VerifyStatus::Violations
            },
            message: format_verify_report(&report, format),
        },
        Err(e) => Verdict {
            status: VerifyStatus::Failed,
            message: format!("Error: {}", e),
        },
    }
}
