//! @ai:module:intent Configuration structs for results regeneration
//! @ai:module:layer infrastructure
//! @ai:module:public_api RegenConfig, PathConfig, RunConfig, InterpreterConfig
//! @ai:module:stateless true

use crate::error::{RegenError, Result};
use rules_gitlink::VerifyConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the committed, aggregated results file.
pub const RESULTS_FILE: &str = rules_gitlink::RESULTS_FILE;

/// @ai:intent Main configuration for a regeneration pass
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegenConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub interpreters: InterpreterConfig,
}

/// @ai:intent Repository layout; every directory except `root` is relative to `root`
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_benchmarks_dir")]
    pub benchmarks_dir: PathBuf,
    #[serde(default = "default_rules_dir")]
    pub rules_dir: PathBuf,
    #[serde(default = "default_runs_dir")]
    pub runs_dir: PathBuf,
    #[serde(default = "default_metrics_dir")]
    pub metrics_dir: PathBuf,
}

/// @ai:intent Run configuration for a regeneration pass
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_runs")]
    pub runs: u32,
    #[serde(default)]
    pub check: bool,
    #[serde(default)]
    pub dry_run: bool,
}

/// @ai:intent Programs bound to script suffixes
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    #[serde(default = "default_python")]
    pub python: String,
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            benchmarks_dir: default_benchmarks_dir(),
            rules_dir: default_rules_dir(),
            runs_dir: default_runs_dir(),
            metrics_dir: default_metrics_dir(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            check: false,
            dry_run: false,
        }
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            shell: default_shell(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_benchmarks_dir() -> PathBuf {
    PathBuf::from("benchmarks")
}

fn default_rules_dir() -> PathBuf {
    PathBuf::from("rules")
}

fn default_runs_dir() -> PathBuf {
    PathBuf::from(".runs")
}

fn default_metrics_dir() -> PathBuf {
    PathBuf::from("_metrics")
}

fn default_runs() -> u32 {
    1
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_shell() -> String {
    "bash".to_string()
}

/// @ai:intent Render a relative path the way git prints it
/// @ai:effects pure
fn git_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl PathConfig {
    /// @ai:intent Directory holding one submodule per rule
    pub fn benchmarks_root(&self) -> PathBuf {
        self.root.join(&self.benchmarks_dir)
    }

    /// @ai:intent Shared, externally populated metrics store
    pub fn metrics_store(&self) -> PathBuf {
        self.root.join(&self.metrics_dir)
    }

    /// @ai:intent Committed results file for one rule/language pair
    pub fn results_path(&self, rule: &str, language: &str) -> PathBuf {
        self.root
            .join(&self.rules_dir)
            .join(rule)
            .join(language)
            .join(RESULTS_FILE)
    }

    /// @ai:intent Transient run directory area for one rule/language pair
    pub fn scratch_dir(&self, rule: &str, language: &str) -> PathBuf {
        self.root.join(&self.runs_dir).join(rule).join(language)
    }

    /// @ai:intent Repository-relative gitlink path of a benchmark submodule
    pub fn benchmark_gitlink(&self, rule: &str) -> String {
        git_path(&self.benchmarks_dir.join(rule))
    }

    /// @ai:intent Repository-relative gitlink path of the metrics store
    pub fn metrics_gitlink(&self) -> String {
        git_path(&self.metrics_dir)
    }

    /// @ai:intent Layout as seen by the PR consistency verifier
    pub fn verify_config(&self) -> VerifyConfig {
        VerifyConfig {
            benchmarks_dir: git_path(&self.benchmarks_dir),
            rules_dir: git_path(&self.rules_dir),
            metrics_path: self.metrics_gitlink(),
        }
    }
}

impl RegenConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Check invariants and make the repository root absolute
    /// @ai:post paths.root is absolute, run.runs >= 1
    /// @ai:effects fs:read
    pub fn validated(mut self) -> Result<Self> {
        if self.run.runs == 0 {
            return Err(RegenError::Config("runs must be at least 1".to_string()));
        }

        self.paths.root = std::fs::canonicalize(&self.paths.root).map_err(|e| {
            RegenError::Config(format!(
                "repository root {} is not accessible: {}",
                self.paths.root.display(),
                e
            ))
        })?;

        Ok(self)
    }
}
