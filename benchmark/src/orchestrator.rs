//! @ai:module:intent Drive selection, runs and aggregation for a regeneration pass
//! @ai:module:layer application
//! @ai:module:public_api Orchestrator, BenchmarkInventory
//! @ai:module:depends_on selection, toolchain, runner, aggregator, report
//! @ai:module:stateless false

use crate::aggregator::AggregatorInvoker;
use crate::catalog::{Benchmark, BenchmarkLocator, BenchmarkLocatorTrait};
use crate::config::RegenConfig;
use crate::error::{RegenError, Result};
use crate::report::{BenchmarkReport, PassReport, ToolchainReport};
use crate::runner::RunExecutor;
use crate::selection::{resolve_selection, SelectionReason, SelectionRequest};
use crate::toolchain::{Protocol, Toolchain, ToolchainDiscoverer};
use rules_gitlink::{GitBackend, GitCli};
use serde::Serialize;
use std::time::Instant;

/// @ai:intent A benchmark together with the toolchains it exposes
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkInventory {
    pub benchmark: Benchmark,
    pub toolchains: Vec<Toolchain>,
}

/// @ai:intent Sequentially regenerates results for selected benchmarks
pub struct Orchestrator<G: GitBackend, L: BenchmarkLocatorTrait> {
    config: RegenConfig,
    git: G,
    locator: L,
    executor: RunExecutor,
    invoker: AggregatorInvoker,
}

impl Orchestrator<GitCli, BenchmarkLocator> {
    /// @ai:intent Orchestrator backed by the git CLI and the configured benchmarks root
    /// @ai:effects pure
    pub fn from_config(config: RegenConfig) -> Self {
        let git = GitCli::new(&config.paths.root);
        let locator = BenchmarkLocator::new(config.paths.benchmarks_root());
        Self::new(config, git, locator)
    }
}

impl<G: GitBackend, L: BenchmarkLocatorTrait> Orchestrator<G, L> {
    /// @ai:intent Create an orchestrator with explicit collaborators
    /// @ai:effects pure
    pub fn new(config: RegenConfig, git: G, locator: L) -> Self {
        let executor = RunExecutor::new(&config);
        let invoker = AggregatorInvoker::new(&config);
        Self {
            config,
            git,
            locator,
            executor,
            invoker,
        }
    }

    /// @ai:intent Every benchmark with its discovered toolchains
    /// @ai:effects fs:read
    pub fn inventory(&self) -> Vec<BenchmarkInventory> {
        self.locator
            .locate_all()
            .into_iter()
            .map(|benchmark| BenchmarkInventory {
                toolchains: ToolchainDiscoverer::discover(&benchmark.path),
                benchmark,
            })
            .collect()
    }

    /// @ai:intent Run one regeneration pass
    /// @ai:post any failure aborts the remaining work
    /// @ai:effects fs:write, process, io
    pub fn run(&self, request: &SelectionRequest) -> Result<PassReport> {
        let selection = resolve_selection(request, &self.locator, &self.git, &self.config.paths)?;
        let dry_run = self.config.run.dry_run;

        let mut report = PassReport::new(selection.reason, dry_run);
        report.unmatched = selection.unmatched.clone();

        if selection.is_empty() {
            match selection.reason {
                SelectionReason::NoChanges | SelectionReason::NoCriteria => tracing::info!(
                    "No benchmark submodule changes detected. Use --all or --bench to force run."
                ),
                _ => tracing::info!("No benchmarks selected ({})", selection.reason.describe()),
            }
        } else {
            tracing::info!(
                "Selected {} benchmark(s): {}",
                selection.benchmarks.len(),
                selection.reason.describe()
            );
        }

        for benchmark in &selection.benchmarks {
            report.benchmarks.push(self.process_benchmark(benchmark)?);
        }

        if self.config.run.check && !dry_run {
            self.assert_no_drift()?;
        }

        Ok(report)
    }

    /// @ai:intent Regenerate every toolchain of one benchmark
    /// @ai:effects fs:write, process
    fn process_benchmark(&self, benchmark: &Benchmark) -> Result<BenchmarkReport> {
        let toolchains = ToolchainDiscoverer::discover(&benchmark.path);
        if toolchains.is_empty() {
            tracing::warn!(
                "skip: {} (no run_all.sh + generate_results.py or generate_results found)",
                benchmark.rule
            );
        }

        let mut reports = Vec::with_capacity(toolchains.len());
        for toolchain in &toolchains {
            reports.push(self.process_toolchain(&benchmark.rule, toolchain)?);
        }

        Ok(BenchmarkReport {
            rule: benchmark.rule.clone(),
            toolchains: reports,
        })
    }

    /// @ai:intent Run and aggregate one toolchain
    /// @ai:effects fs:write, process
    fn process_toolchain(&self, rule: &str, toolchain: &Toolchain) -> Result<ToolchainReport> {
        let language = toolchain.language.as_str();
        let results_path = self.config.paths.results_path(rule, language);
        let runs = match toolchain.protocol {
            Protocol::RunAggregation { .. } => self.config.run.runs,
            Protocol::MetricsStore { .. } => 0,
        };

        let mut report = ToolchainReport {
            language: language.to_string(),
            protocol: toolchain.protocol.name().to_string(),
            runs,
            results_path: results_path
                .strip_prefix(&self.config.paths.root)
                .unwrap_or(results_path.as_path())
                .to_path_buf(),
            source: None,
            duration_ms: 0,
        };

        if self.config.run.dry_run {
            tracing::info!(
                "[dry-run] {}/{} via {} -> {}",
                rule,
                language,
                report.protocol,
                report.results_path.display()
            );
            return Ok(report);
        }

        let start = Instant::now();
        let source = match &toolchain.protocol {
            Protocol::RunAggregation { runner, aggregator } => {
                let run_set = self
                    .executor
                    .execute(rule, language, runner, runs, &toolchain.dir)?;
                let output = self.invoker.prepare_results_path(rule, language)?;
                self.invoker
                    .aggregate_runs(aggregator, &run_set.scratch, &output, &toolchain.dir)?
            }
            Protocol::MetricsStore { generator } => {
                let output = self.invoker.prepare_results_path(rule, language)?;
                self.invoker
                    .generate_from_store(generator, &output, &toolchain.dir)?
            }
        };

        report.source = Some(source);
        report.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        Ok(report)
    }

    /// @ai:intent Fail when regeneration left uncommitted differences
    /// @ai:effects io
    fn assert_no_drift(&self) -> Result<()> {
        tracing::info!("Checking that regenerated results match the committed ones");
        self.git.assert_clean().map_err(|e| match e {
            rules_gitlink::Error::GitFailed {
                code: Some(1),
                diagnostics,
                ..
            } => RegenError::Drift(diagnostics),
            other => RegenError::Git(other),
        })
    }
}
