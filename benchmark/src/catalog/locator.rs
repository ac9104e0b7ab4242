//! @ai:module:intent Enumerate benchmark submodules under the benchmarks root
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkLocator, BenchmarkLocatorTrait
//! @ai:module:stateless true

use crate::catalog::benchmark::Benchmark;
use std::path::PathBuf;
use walkdir::WalkDir;

/// @ai:intent Trait for finding benchmarks
pub trait BenchmarkLocatorTrait {
    /// @ai:intent List every benchmark submodule, sorted by rule name
    fn locate_all(&self) -> Vec<Benchmark>;

    /// @ai:intent Find a single benchmark by rule name
    fn locate(&self, rule: &str) -> Option<Benchmark> {
        self.locate_all().into_iter().find(|b| b.rule == rule)
    }
}

/// @ai:intent Finds benchmarks among the immediate subdirectories of a root
pub struct BenchmarkLocator {
    root: PathBuf,
}

impl BenchmarkLocator {
    /// @ai:intent Create a locator for the given benchmarks root
    /// @ai:effects pure
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BenchmarkLocatorTrait for BenchmarkLocator {
    /// @ai:intent List marked subdirectories; a missing root yields an empty list
    /// @ai:effects fs:read
    fn locate_all(&self) -> Vec<Benchmark> {
        if !self.root.is_dir() {
            tracing::debug!("Benchmarks root {} does not exist", self.root.display());
            return Vec::new();
        }

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry in {}: {}", self.root.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_dir())
            .filter(|e| Benchmark::is_submodule(e.path()))
            .filter_map(|e| Benchmark::from_dir(e.path()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_dir(root: &Path, name: &str, marked: bool) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        if marked {
            std::fs::write(dir.join(".git"), "gitdir: elsewhere\n").unwrap();
        }
    }

    #[test]
    fn test_only_marked_directories_sorted_by_name() {
        let temp = TempDir::new().unwrap();
        make_dir(temp.path(), "TDD", true);
        make_dir(temp.path(), "ADR", true);
        make_dir(temp.path(), "scratch", false);
        make_dir(temp.path(), "DDD", true);
        std::fs::write(temp.path().join("README.md"), "not a benchmark").unwrap();

        let rules: Vec<_> = BenchmarkLocator::new(temp.path())
            .locate_all()
            .into_iter()
            .map(|b| b.rule)
            .collect();

        assert_eq!(rules, vec!["ADR", "DDD", "TDD"]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let locator = BenchmarkLocator::new(temp.path().join("benchmarks"));
        assert!(locator.locate_all().is_empty());
    }

    #[test]
    fn test_locate_by_rule() {
        let temp = TempDir::new().unwrap();
        make_dir(temp.path(), "TDD", true);
        make_dir(temp.path(), "unmarked", false);

        let locator = BenchmarkLocator::new(temp.path());
        assert_eq!(locator.locate("TDD").unwrap().path, temp.path().join("TDD"));
        assert!(locator.locate("unmarked").is_none());
    }
}
