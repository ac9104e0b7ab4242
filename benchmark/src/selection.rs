//! @ai:module:intent Resolve which benchmarks a regeneration pass covers
//! @ai:module:layer application
//! @ai:module:public_api SelectionRequest, Selection, SelectionReason, resolve_selection
//! @ai:module:depends_on catalog, config
//! @ai:module:stateless true

use crate::catalog::{Benchmark, BenchmarkLocatorTrait};
use crate::config::PathConfig;
use crate::error::Result;
use rules_gitlink::{GitBackend, RevisionRange};
use serde::{Deserialize, Serialize};

/// @ai:intent The selection criteria supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionRequest {
    All,
    Named(Vec<String>),
    Changes(RevisionRange),
    Unspecified,
}

impl SelectionRequest {
    /// @ai:intent Apply flag precedence: --all, then --bench, then a revision range
    /// @ai:effects pure
    pub fn from_flags(all: bool, benches: &[String], range: Option<RevisionRange>) -> Self {
        if all {
            SelectionRequest::All
        } else if !benches.is_empty() {
            SelectionRequest::Named(benches.to_vec())
        } else if let Some(range) = range {
            SelectionRequest::Changes(range)
        } else {
            SelectionRequest::Unspecified
        }
    }
}

/// @ai:intent Why the selected benchmarks were chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    All,
    Named,
    MetricsStoreChanged,
    SubmodulesChanged,
    NoChanges,
    NoCriteria,
}

impl SelectionReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SelectionReason::All => "all benchmarks requested",
            SelectionReason::Named => "benchmarks named explicitly",
            SelectionReason::MetricsStoreChanged => "shared metrics store changed",
            SelectionReason::SubmodulesChanged => "benchmark submodules changed",
            SelectionReason::NoChanges => "no benchmark submodule changes detected",
            SelectionReason::NoCriteria => "no selection criteria and no revision range",
        }
    }
}

/// @ai:intent Concrete benchmarks to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub benchmarks: Vec<Benchmark>,
    pub reason: SelectionReason,
    /// Requested names or changed gitlinks that matched no local benchmark.
    pub unmatched: Vec<String>,
}

impl Selection {
    fn new(benchmarks: Vec<Benchmark>, reason: SelectionReason) -> Self {
        Self {
            benchmarks,
            reason,
            unmatched: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// @ai:intent Turn a request into a list of benchmarks
/// @ai:post unmatched names are reported, never fatal
/// @ai:effects fs:read, io
pub fn resolve_selection(
    request: &SelectionRequest,
    locator: &impl BenchmarkLocatorTrait,
    git: &impl GitBackend,
    paths: &PathConfig,
) -> Result<Selection> {
    match request {
        SelectionRequest::All => Ok(Selection::new(locator.locate_all(), SelectionReason::All)),
        SelectionRequest::Named(names) => Ok(select_named(names, locator)),
        SelectionRequest::Changes(range) => select_changed(range, locator, git, paths),
        SelectionRequest::Unspecified => Ok(Selection::new(Vec::new(), SelectionReason::NoCriteria)),
    }
}

fn select_named(names: &[String], locator: &impl BenchmarkLocatorTrait) -> Selection {
    let available = locator.locate_all();
    let mut selection = Selection::new(Vec::new(), SelectionReason::Named);

    for name in names {
        if selection.benchmarks.iter().any(|b| &b.rule == name) {
            continue;
        }
        match available.iter().find(|b| &b.rule == name) {
            Some(bench) => selection.benchmarks.push(bench.clone()),
            None => {
                tracing::warn!("Benchmark not found: {}", name);
                selection.unmatched.push(name.clone());
            }
        }
    }

    selection
}

fn select_changed(
    range: &RevisionRange,
    locator: &impl BenchmarkLocatorTrait,
    git: &impl GitBackend,
    paths: &PathConfig,
) -> Result<Selection> {
    let diff = git.gitlinks(range)?;
    for (line, reason) in &diff.skipped {
        tracing::warn!("Ignored malformed diff line ({}): {}", reason, line);
    }

    if diff.contains(&paths.metrics_gitlink()) {
        tracing::info!("{} changed; regenerating every benchmark", paths.metrics_gitlink());
        return Ok(Selection::new(
            locator.locate_all(),
            SelectionReason::MetricsStoreChanged,
        ));
    }

    let available = locator.locate_all();
    let benchmarks: Vec<Benchmark> = available
        .iter()
        .filter(|b| diff.contains(&paths.benchmark_gitlink(&b.rule)))
        .cloned()
        .collect();

    let verify = paths.verify_config();
    let unmatched: Vec<String> = diff
        .changes
        .iter()
        .filter(|c| verify.rule_for(&c.path).is_some())
        .filter(|c| {
            !available
                .iter()
                .any(|b| paths.benchmark_gitlink(&b.rule) == c.path)
        })
        .map(|c| c.path.clone())
        .collect();
    for path in &unmatched {
        tracing::warn!("Changed submodule {} is not a checked-out benchmark; skipping", path);
    }

    let reason = if benchmarks.is_empty() {
        SelectionReason::NoChanges
    } else {
        SelectionReason::SubmodulesChanged
    };

    Ok(Selection {
        benchmarks,
        reason,
        unmatched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BenchmarkLocator;
    use crate::testutil::make_benchmark;
    use pretty_assertions::assert_eq;
    use rules_gitlink::MockGit;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, PathConfig) {
        let temp = TempDir::new().unwrap();
        for rule in ["ADR", "DDD", "TDD"] {
            make_benchmark(temp.path(), rule);
        }
        let paths = PathConfig {
            root: temp.path().to_path_buf(),
            ..Default::default()
        };
        (temp, paths)
    }

    fn rules(selection: &Selection) -> Vec<&str> {
        selection.benchmarks.iter().map(|b| b.rule.as_str()).collect()
    }

    fn range() -> SelectionRequest {
        SelectionRequest::Changes(RevisionRange::new("base", "head"))
    }

    #[test]
    fn test_flag_precedence() {
        let names = vec!["TDD".to_string()];
        let range = Some(RevisionRange::new("a", "b"));

        assert_eq!(SelectionRequest::from_flags(true, &names, range.clone()), SelectionRequest::All);
        assert_eq!(
            SelectionRequest::from_flags(false, &names, range.clone()),
            SelectionRequest::Named(names.clone())
        );
        assert!(matches!(
            SelectionRequest::from_flags(false, &[], range),
            SelectionRequest::Changes(_)
        ));
        assert_eq!(SelectionRequest::from_flags(false, &[], None), SelectionRequest::Unspecified);
    }

    #[test]
    fn test_named_selection_reports_unknown_names() {
        let (_temp, paths) = fixture();
        let locator = BenchmarkLocator::new(paths.benchmarks_root());
        let request = SelectionRequest::Named(vec![
            "TDD".to_string(),
            "NOPE".to_string(),
            "ADR".to_string(),
            "TDD".to_string(),
        ]);

        let selection = resolve_selection(&request, &locator, &MockGit::default(), &paths).unwrap();

        assert_eq!(rules(&selection), vec!["TDD", "ADR"]);
        assert_eq!(selection.unmatched, vec!["NOPE".to_string()]);
    }

    #[test]
    fn test_single_changed_submodule_selects_exactly_that_benchmark() {
        let (_temp, paths) = fixture();
        let locator = BenchmarkLocator::new(paths.benchmarks_root());
        let git = MockGit::new(
            ":160000 160000 a b M\tbenchmarks/TDD\n:100644 100644 c d M\tREADME.md\n",
            &[],
        );

        let selection = resolve_selection(&range(), &locator, &git, &paths).unwrap();

        assert_eq!(rules(&selection), vec!["TDD"]);
        assert_eq!(selection.reason, SelectionReason::SubmodulesChanged);
    }

    #[test]
    fn test_metrics_store_change_selects_everything() {
        let (_temp, paths) = fixture();
        let locator = BenchmarkLocator::new(paths.benchmarks_root());
        let git = MockGit::new(
            ":160000 160000 a b M\t_metrics\n:160000 160000 a b M\tbenchmarks/TDD\n",
            &[],
        );

        let selection = resolve_selection(&range(), &locator, &git, &paths).unwrap();

        assert_eq!(rules(&selection), vec!["ADR", "DDD", "TDD"]);
        assert_eq!(selection.reason, SelectionReason::MetricsStoreChanged);
    }

    #[test]
    fn test_changed_submodule_missing_locally_is_skipped() {
        let (_temp, paths) = fixture();
        let locator = BenchmarkLocator::new(paths.benchmarks_root());
        let git = MockGit::new(":160000 160000 a b M\tbenchmarks/GHOST\n", &[]);

        let selection = resolve_selection(&range(), &locator, &git, &paths).unwrap();

        assert!(selection.is_empty());
        assert_eq!(selection.reason, SelectionReason::NoChanges);
        assert_eq!(selection.unmatched, vec!["benchmarks/GHOST".to_string()]);
    }

    #[test]
    fn test_no_criteria_selects_nothing() {
        let (_temp, paths) = fixture();
        let locator = BenchmarkLocator::new(paths.benchmarks_root());

        let selection =
            resolve_selection(&SelectionRequest::Unspecified, &locator, &MockGit::default(), &paths)
                .unwrap();

        assert!(selection.is_empty());
        assert_eq!(selection.reason, SelectionReason::NoCriteria);
    }
}
