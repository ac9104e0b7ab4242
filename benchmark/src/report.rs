//! @ai:module:intent JSON summary of a regeneration pass
//! @ai:module:layer infrastructure
//! @ai:module:public_api PassReport, BenchmarkReport, ToolchainReport, JsonReporter
//! @ai:module:stateless true

use crate::aggregator::ResultsSource;
use crate::error::Result;
use crate::selection::SelectionReason;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Everything a pass selected and produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub generated_at: String,
    pub reason: SelectionReason,
    pub dry_run: bool,
    pub benchmarks: Vec<BenchmarkReport>,
    pub unmatched: Vec<String>,
}

/// @ai:intent Toolchains processed for one benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub rule: String,
    pub toolchains: Vec<ToolchainReport>,
}

/// @ai:intent Outcome of one toolchain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainReport {
    pub language: String,
    pub protocol: String,
    /// Runner iterations; zero for metrics-store generators.
    pub runs: u32,
    pub results_path: PathBuf,
    /// None when the pass was a dry run.
    pub source: Option<ResultsSource>,
    pub duration_ms: u64,
}

impl PassReport {
    /// @ai:intent Start an empty report stamped with the current time
    /// @ai:effects pure
    pub fn new(reason: SelectionReason, dry_run: bool) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            reason,
            dry_run,
            benchmarks: Vec::new(),
            unmatched: Vec::new(),
        }
    }

    /// @ai:intent Count toolchains across all benchmarks
    pub fn toolchain_count(&self) -> usize {
        self.benchmarks.iter().map(|b| b.toolchains.len()).sum()
    }
}

/// @ai:intent Writes pass reports as pretty-printed JSON
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    pub fn generate(&self, report: &PassReport, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_json_report() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("reports/pass.json");

        let mut report = PassReport::new(SelectionReason::SubmodulesChanged, false);
        report.benchmarks.push(BenchmarkReport {
            rule: "TDD".to_string(),
            toolchains: vec![ToolchainReport {
                language: "go".to_string(),
                protocol: "run-aggregation".to_string(),
                runs: 3,
                results_path: PathBuf::from("rules/TDD/go/RESULTS.md"),
                source: Some(ResultsSource::File),
                duration_ms: 12,
            }],
        });

        JsonReporter::new().generate(&report, &output).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["reason"], "submodules_changed");
        assert_eq!(value["benchmarks"][0]["toolchains"][0]["source"], "file");
        assert!(chrono::DateTime::parse_from_rfc3339(value["generated_at"].as_str().unwrap()).is_ok());
        assert_eq!(report.toolchain_count(), 1);
    }
}
