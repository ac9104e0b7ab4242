//! @ai:module:intent Benchmark submodule definitions and discovery
//! @ai:module:layer domain
//! @ai:module:public_api Benchmark, BenchmarkLocator, BenchmarkLocatorTrait

pub mod benchmark;
pub mod locator;

pub use benchmark::Benchmark;
pub use locator::{BenchmarkLocator, BenchmarkLocatorTrait};
