//! @ai:module:intent Subprocess invocation and repeated runner execution
//! @ai:module:layer infrastructure
//! @ai:module:public_api Invocation, Interpreter, RunExecutor, RunSet

pub mod command;
pub mod executor;

pub use command::{CommandOutput, Interpreter, Invocation};
pub use executor::{RunExecutor, RunSet};
