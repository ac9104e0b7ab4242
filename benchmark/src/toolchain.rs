//! @ai:module:intent Discover per-language toolchains inside a benchmark
//! @ai:module:layer infrastructure
//! @ai:module:public_api ToolchainDiscoverer, Toolchain, Protocol, Precedence
//! @ai:module:stateless true

use crate::runner::command::Interpreter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Ordered candidate file names; the first existing file wins
#[derive(Debug, Clone, Copy)]
pub struct Precedence {
    candidates: &'static [&'static str],
}

impl Precedence {
    pub const fn new(candidates: &'static [&'static str]) -> Self {
        Self { candidates }
    }

    /// @ai:intent Resolve the first candidate present as a file in `dir`
    /// @ai:effects fs:read
    pub fn resolve(&self, dir: &Path) -> Option<PathBuf> {
        self.candidates
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

/// Entry point executed once per run.
pub const RUNNER: Precedence = Precedence::new(&["run_all.sh", "run_all"]);

/// Aggregator accepted by the run-aggregation protocol.
pub const RUN_AGGREGATOR: Precedence = Precedence::new(&["generate_results.py"]);

/// Generators accepted by the metrics-store protocol.
pub const GENERATOR: Precedence =
    Precedence::new(&["generate_results.py", "generate_results.sh", "generate_results"]);

/// @ai:intent How a toolchain turns into a results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Protocol {
    /// Run the runner N times, then aggregate the run directories.
    RunAggregation { runner: PathBuf, aggregator: PathBuf },
    /// Generate results once from the shared metrics store.
    MetricsStore { generator: PathBuf },
}

impl Protocol {
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::RunAggregation { .. } => "run-aggregation",
            Protocol::MetricsStore { .. } => "metrics-store",
        }
    }

    /// @ai:intent The script that writes RESULTS.md
    pub fn generator(&self) -> &Path {
        match self {
            Protocol::RunAggregation { aggregator, .. } => aggregator,
            Protocol::MetricsStore { generator } => generator,
        }
    }
}

/// @ai:intent One language implementation of a benchmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    pub language: String,
    pub dir: PathBuf,
    pub protocol: Protocol,
}

impl Toolchain {
    /// @ai:intent Classify a language directory, None when it is not a toolchain
    /// @ai:effects fs:read
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let language = dir.file_name()?.to_str()?.to_string();

        let runner = RUNNER.resolve(dir);
        let aggregator = RUN_AGGREGATOR.resolve(dir);
        let protocol = match (runner, aggregator) {
            (Some(runner), Some(aggregator)) => Protocol::RunAggregation { runner, aggregator },
            _ => Protocol::MetricsStore {
                generator: GENERATOR.resolve(dir)?,
            },
        };

        Some(Self {
            language,
            dir: dir.to_path_buf(),
            protocol,
        })
    }

    pub fn interpreter(&self) -> Interpreter {
        Interpreter::for_path(self.protocol.generator())
    }
}

/// @ai:intent Scans a benchmark's immediate subdirectories for toolchains
pub struct ToolchainDiscoverer;

impl ToolchainDiscoverer {
    /// @ai:intent Discover toolchains in directory name order
    /// @ai:effects fs:read
    pub fn discover(benchmark_dir: &Path) -> Vec<Toolchain> {
        WalkDir::new(benchmark_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", benchmark_dir.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| {
                let toolchain = Toolchain::from_dir(e.path());
                if toolchain.is_none() {
                    tracing::debug!("{} has no runner or generator", e.path().display());
                }
                toolchain
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn language_dir(root: &Path, language: &str, files: &[&str]) -> PathBuf {
        let dir = root.join(language);
        std::fs::create_dir_all(&dir).unwrap();
        for file in files {
            std::fs::write(dir.join(file), "#!/bin/sh\n").unwrap();
        }
        dir
    }

    #[test]
    fn test_runner_prefers_shell_script() {
        let temp = TempDir::new().unwrap();
        let dir = language_dir(temp.path(), "go", &["run_all", "run_all.sh"]);
        assert_eq!(RUNNER.resolve(&dir), Some(dir.join("run_all.sh")));
    }

    #[test]
    fn test_generator_precedence() {
        let temp = TempDir::new().unwrap();
        let dir = language_dir(temp.path(), "go", &["generate_results", "generate_results.sh"]);
        assert_eq!(GENERATOR.resolve(&dir), Some(dir.join("generate_results.sh")));

        std::fs::write(dir.join("generate_results.py"), "").unwrap();
        assert_eq!(GENERATOR.resolve(&dir), Some(dir.join("generate_results.py")));
    }

    #[test]
    fn test_plain_run_all_with_python_aggregator_is_run_aggregation() {
        let temp = TempDir::new().unwrap();
        let dir = language_dir(temp.path(), "go", &["run_all", "generate_results.py"]);

        let toolchain = Toolchain::from_dir(&dir).unwrap();
        assert_eq!(toolchain.language, "go");
        assert_eq!(
            toolchain.protocol,
            Protocol::RunAggregation {
                runner: dir.join("run_all"),
                aggregator: dir.join("generate_results.py"),
            }
        );
        assert_eq!(toolchain.interpreter(), Interpreter::Python);
    }

    #[test]
    fn test_generator_only_is_metrics_store() {
        let temp = TempDir::new().unwrap();
        let dir = language_dir(temp.path(), "rust", &["generate_results.sh"]);

        let toolchain = Toolchain::from_dir(&dir).unwrap();
        assert_eq!(toolchain.protocol.name(), "metrics-store");
        assert_eq!(toolchain.protocol.generator(), dir.join("generate_results.sh"));
    }

    #[test]
    fn test_runner_without_python_aggregator_uses_generator() {
        let temp = TempDir::new().unwrap();
        let dir = language_dir(temp.path(), "java", &["run_all.sh", "generate_results"]);

        let toolchain = Toolchain::from_dir(&dir).unwrap();
        assert_eq!(
            toolchain.protocol,
            Protocol::MetricsStore {
                generator: dir.join("generate_results"),
            }
        );
    }

    #[test]
    fn test_directory_without_runner_or_generator_is_ignored() {
        let temp = TempDir::new().unwrap();
        language_dir(temp.path(), "docs", &["README.md"]);
        language_dir(temp.path(), "runner-only", &["run_all.sh"]);

        assert!(ToolchainDiscoverer::discover(temp.path()).is_empty());
    }

    #[test]
    fn test_discovery_follows_directory_order() {
        let temp = TempDir::new().unwrap();
        language_dir(temp.path(), "typescript", &["run_all.sh", "generate_results.py"]);
        language_dir(temp.path(), "go", &["run_all.sh", "generate_results.py"]);
        language_dir(temp.path(), "notes", &[]);
        std::fs::write(temp.path().join("run_all.sh"), "").unwrap();

        let languages: Vec<_> = ToolchainDiscoverer::discover(temp.path())
            .into_iter()
            .map(|t| t.language)
            .collect();
        assert_eq!(languages, vec!["go", "typescript"]);
    }
}
