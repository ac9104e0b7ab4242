//! @ai:module:intent Format verification results for terminals and machines
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_verify_report, to_json
//! @ai:module:depends_on verify
//! @ai:module:stateless true

use crate::verify::VerifyReport;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a verification report as a string
/// @ai:effects pure
pub fn format_verify_report(report: &VerifyReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => format_verify_report_text(report),
    }
}

fn format_verify_report_text(report: &VerifyReport) -> String {
    if report.gitlinks.is_empty() {
        return "No submodule pointer changes detected.".to_string();
    }

    if report.passed() {
        return format!(
            "{} submodule changes accompanied by {} updates.",
            "OK:".green().bold(),
            crate::verify::RESULTS_FILE
        );
    }

    let mut output = format!(
        "{}\n",
        "PR must update results when submodule pointers change:"
            .red()
            .bold()
    );
    for violation in &report.violations {
        output.push_str(&format!("- {}\n", violation.message));
    }
    output.trim_end().to_string()
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::Violation;

    #[test]
    fn test_text_lists_every_violation() {
        colored::control::set_override(false);
        let report = VerifyReport {
            gitlinks: vec!["_metrics".to_string(), "benchmarks/TDD".to_string()],
            changed_paths: 2,
            violations: vec![
                Violation {
                    gitlink: "_metrics".to_string(),
                    expected: "rules/*/**/RESULTS.md".to_string(),
                    message: "Changed _metrics submodule but did not update any rules/*/**/RESULTS.md"
                        .to_string(),
                },
                Violation {
                    gitlink: "benchmarks/TDD".to_string(),
                    expected: "rules/TDD/**/RESULTS.md".to_string(),
                    message: "Changed benchmarks/TDD submodule but did not update any rules/TDD/**/RESULTS.md"
                        .to_string(),
                },
            ],
        };

        let text = format_verify_report(&report, OutputFormat::Text);
        assert!(text.starts_with("PR must update results"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 2);
    }

    #[test]
    fn test_json_includes_counts() {
        let report = VerifyReport {
            gitlinks: vec!["benchmarks/TDD".to_string()],
            changed_paths: 3,
            violations: vec![],
        };
        let json = format_verify_report(&report, OutputFormat::Json);
        assert!(json.contains("\"changed_paths\":3"));
    }
}
