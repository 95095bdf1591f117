//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::tools::{CommandOutput, CommandRunner, Invocation, RunError, RunResult};

type Response = Arc<dyn Fn(&Invocation) -> RunResult<CommandOutput> + Send + Sync>;

/// Runner that answers from per-program scripts and records every call.
///
/// Programs without a script fail to spawn, like a missing executable.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an arbitrary response.
    pub fn respond<F>(mut self, program: &str, f: F) -> Self
    where
        F: Fn(&Invocation) -> RunResult<CommandOutput> + Send + Sync + 'static,
    {
        self.responses.insert(program.to_string(), Arc::new(f));
        self
    }

    /// Script a successful run printing `stdout`.
    pub fn ok(self, program: &str, stdout: &str) -> Self {
        let stdout = stdout.to_string();
        self.respond(program, move |_| Ok(CommandOutput::success(stdout.clone())))
    }

    /// Script a run that always hits its deadline.
    pub fn timing_out(self, program: &str) -> Self {
        self.respond(program, |inv| {
            Err(RunError::TimedOut {
                program: inv.program.clone(),
                timeout: inv.timeout,
            })
        })
    }

    /// Every invocation seen so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().clone()
    }

    /// Number of invocations of one program.
    pub fn calls_to(&self, program: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|inv| inv.program == program)
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> RunResult<CommandOutput> {
        self.calls.lock().push(invocation.clone());
        match self.responses.get(&invocation.program) {
            Some(response) => response(invocation),
            None => Err(RunError::Spawn {
                program: invocation.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            }),
        }
    }
}
