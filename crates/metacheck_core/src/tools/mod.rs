//! External tool plumbing.
//!
//! - [`CommandRunner`]: runs one bounded-lifetime child process
//! - [`ToolRegistry`]: probes and caches tool availability
//!
//! Both sit behind traits so the engine can be driven by fakes in tests.

mod registry;
mod runner;

pub use registry::{tools_status, Availability, ToolRegistry, ToolStatus};
pub use runner::{CommandOutput, CommandRunner, Invocation, RunError, RunResult, SystemRunner};
