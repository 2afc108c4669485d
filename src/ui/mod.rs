//! UI sink for configure notices
//!
//! This module handles:
//! - Leveled log lines (info, success, warning, error)
//! - Action outcomes such as `DONE:    create config/cors.ts`
//! - The "wait" spinner shown while a dependency manager runs
//!
//! All output goes through the [`Logger`] trait, which is passed explicitly to
//! every component that emits a notice. [`TerminalLogger`] renders to the
//! terminal; [`MemoryLogger`] captures plain lines for assertions.

#[allow(dead_code)] // used in tests
mod memory;
mod terminal;

#[allow(unused_imports)]
pub use memory::{LogLine, MemoryLogger, Stream};
pub use terminal::TerminalLogger;

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    /// Plain prefix used when the line is rendered without colors
    pub fn label(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warn",
            Level::Error => "error",
        }
    }

    pub fn stream(self) -> Stream {
        match self {
            Level::Error => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// Result of a filesystem action performed on behalf of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was carried out, e.g. `create config/cors.ts`
    Done { action: String },
    /// The action was not needed; `reason` is shown next to it
    Skipped { action: String, reason: String },
}

impl ActionOutcome {
    pub fn done(action: impl Into<String>) -> Self {
        ActionOutcome::Done {
            action: action.into(),
        }
    }

    pub fn skipped(action: impl Into<String>, reason: impl Into<String>) -> Self {
        ActionOutcome::Skipped {
            action: action.into(),
            reason: reason.into(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ActionOutcome::Done { .. })
    }

    /// Plain rendering: `DONE:    <action>` or `SKIPPED: <action> (<reason>)`
    pub fn plain(&self) -> String {
        match self {
            ActionOutcome::Done { action } => format!("DONE:    {}", action),
            ActionOutcome::Skipped { action, reason } => {
                format!("SKIPPED: {} ({})", action, reason)
            }
        }
    }
}

/// Handle for a running "wait" notice
pub trait Spinner {
    /// Replace the message shown next to the spinner
    fn update(&mut self, message: &str);

    /// Stop animating and leave the last message in place
    fn stop(&mut self);
}

/// Sink for every user-visible notice emitted while configuring a package
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn action(&self, outcome: &ActionOutcome);

    /// Start a wait notice; only drawn in verbose mode by the terminal logger
    fn spinner(&self, message: &str) -> Box<dyn Spinner + '_>;

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.log(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}
