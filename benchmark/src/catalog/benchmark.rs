//! @ai:module:intent Benchmark definition: an independently versioned rule directory
//! @ai:module:layer domain
//! @ai:module:public_api Benchmark
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Marker whose presence makes a directory its own repository.
pub const VCS_MARKER: &str = ".git";

/// @ai:intent A benchmark submodule, identified by its rule name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    /// Last path segment of the benchmark directory (e.g. "TDD")
    pub rule: String,
    pub path: PathBuf,
}

impl Benchmark {
    /// @ai:intent Build a benchmark from a directory, using its name as the rule
    /// @ai:effects pure
    pub fn from_dir(path: &Path) -> Option<Self> {
        let rule = path.file_name()?.to_str()?.to_string();
        Some(Self {
            rule,
            path: path.to_path_buf(),
        })
    }

    /// @ai:intent Check whether a directory carries a nested version-control marker
    /// @ai:effects fs:read
    pub fn is_submodule(path: &Path) -> bool {
        path.join(VCS_MARKER).exists()
    }
}

impl std::fmt::Display for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_is_last_path_segment() {
        let bench = Benchmark::from_dir(Path::new("/repo/benchmarks/TDD")).unwrap();
        assert_eq!(bench.rule, "TDD");
        assert_eq!(bench.to_string(), "TDD");
    }

    #[test]
    fn test_gitfile_counts_as_marker() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(!Benchmark::is_submodule(temp.path()));

        std::fs::write(temp.path().join(".git"), "gitdir: ../.git/modules/TDD\n").unwrap();
        assert!(Benchmark::is_submodule(temp.path()));
    }
}
