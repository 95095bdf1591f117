//! Command runner for external process execution.
//!
//! Every invocation is a fresh child process with piped output and a hard
//! deadline. When the deadline passes the child is killed and the caller
//! gets [`RunError::TimedOut`].

use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Poll interval while waiting for a child to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors that prevent a command from producing an exit status.
#[derive(Error, Debug)]
pub enum RunError {
    /// The executable could not be started (usually not installed).
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child did not exit before its deadline and was killed.
    #[error("{program} timed out after {:.1}s", timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    /// Waiting on or reading from the child failed.
    #[error("I/O error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for command execution.
pub type RunResult<T> = Result<T, RunError>;

/// A single command line with its deadline.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub timeout: Duration,
}

impl Invocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Arguments as lossy strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Shell-like rendering for logs.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in self.args_lossy() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful exit with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed exit with the given code and stderr.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Diagnostic text for a failed run: stderr if present, else a generic line.
    pub fn diagnostic(&self, program: &str) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("{} exited with status {}", program, code),
            None => format!("{} was terminated by a signal", program),
        }
    }
}

/// Runs external commands.
///
/// Implementations must never block longer than the invocation's timeout
/// plus teardown overhead.
pub trait CommandRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> RunResult<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> RunResult<CommandOutput> {
        let program = invocation.program.as_str();
        tracing::debug!(command = %invocation.command_line(), "spawning");

        let mut child = Command::new(program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        // Drain both pipes on their own threads so a chatty child can never
        // block on a full pipe while we poll for its exit.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let io_err = |source| RunError::Io {
            program: program.to_string(),
            source,
        };

        // A deadline too far out to represent is no deadline at all.
        let deadline = Instant::now().checked_add(invocation.timeout);

        let status = match wait_with_deadline(&mut child, deadline).map_err(io_err)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(
                    program,
                    timeout_secs = invocation.timeout.as_secs_f64(),
                    "killed after timeout"
                );
                // Reader threads are left detached: a grandchild may still
                // hold the pipes open.
                return Err(timed_out(invocation));
            }
        };

        // The child is gone but a background grandchild can keep the pipes
        // open; the remaining budget still applies.
        let (stdout, stderr) = match (collect(stdout, deadline), collect(stderr, deadline)) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                tracing::warn!(
                    program,
                    timeout_secs = invocation.timeout.as_secs_f64(),
                    "output still open after exit, abandoning readers"
                );
                return Err(timed_out(invocation));
            }
        };

        Ok(CommandOutput {
            code: status.code(),
            success: status.success(),
            stdout,
            stderr,
        })
    }
}

fn timed_out(invocation: &Invocation) -> RunError {
    RunError::TimedOut {
        program: invocation.program.clone(),
        timeout: invocation.timeout,
    }
}

/// Poll until the child exits or the deadline passes.
///
/// Returns `Ok(None)` on timeout.
fn wait_with_deadline(
    child: &mut Child,
    deadline: Option<Instant>,
) -> io::Result<Option<std::process::ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Read a pipe to its end on a dedicated thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    match pipe {
        Some(mut pipe) => {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }
        None => {
            let _ = tx.send(Vec::new());
        }
    }
    rx
}

/// Wait for a reader's buffer. `None` when the deadline passes first.
fn collect(rx: Receiver<Vec<u8>>, deadline: Option<Instant>) -> Option<String> {
    let received = match deadline {
        Some(deadline) => {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(bytes) => Some(bytes),
                Err(RecvTimeoutError::Timeout) => return None,
                Err(RecvTimeoutError::Disconnected) => None,
            }
        }
        None => rx.recv().ok(),
    };
    Some(String::from_utf8_lossy(&received.unwrap_or_default()).into_owned())
}
