//! @ai:module:intent Rule benchmark results regeneration library
//! @ai:module:layer application
//! @ai:module:public_api config, catalog, toolchain, runner, aggregator, selection, orchestrator, report

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod selection;
pub mod toolchain;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregator::{AggregatorInvoker, ResultsSource};
pub use catalog::{Benchmark, BenchmarkLocator, BenchmarkLocatorTrait};
pub use config::{InterpreterConfig, PathConfig, RegenConfig, RunConfig};
pub use error::{RegenError, Result};
pub use orchestrator::{BenchmarkInventory, Orchestrator};
pub use report::{JsonReporter, PassReport};
pub use runner::{Interpreter, Invocation, RunExecutor, RunSet};
pub use selection::{resolve_selection, Selection, SelectionReason, SelectionRequest};
pub use toolchain::{Protocol, Toolchain, ToolchainDiscoverer};
