//! External process invocation for dependency managers
//!
//! The [`ProcessRunner`] trait is the seam between the installer and the
//! operating system. [`SystemRunner`] spawns the real executable, captures its
//! error output and enforces the optional timeout by polling `try_wait`.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{RigupError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A single blocking command to run from the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// Space separated command line, as shown in error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external processes to completion
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        let program =
            which::which(&invocation.program).map_err(|_| RigupError::ManagerNotFound {
                program: invocation.program.clone(),
            })?;

        let mut child = Command::new(program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RigupError::IoError {
                message: format!("Failed to spawn {}: {}", invocation.command_line(), e),
            })?;

        // Drain stderr on a separate thread so a chatty manager cannot block on a full pipe
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut buffer = String::new();
                let _ = stderr.read_to_string(&mut buffer);
                buffer
            })
        });

        let deadline = invocation.timeout.map(|t| (t, Instant::now() + t));
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if let Some((timeout, _)) = deadline.filter(|(_, d)| Instant::now() >= *d) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RigupError::InstallTimedOut {
                    command: invocation.command_line(),
                    timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        Ok(ProcessOutput {
            code: status.code(),
            stderr,
        })
    }
}
