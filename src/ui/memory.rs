//! In-memory logger capturing plain log lines

use std::sync::{Mutex, MutexGuard};

use super::{ActionOutcome, Level, Logger, Spinner};

/// Output stream a line would have been written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// One captured log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub message: String,
    pub stream: Stream,
}

/// Logger that records every notice instead of printing it
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<LogLine>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured lines in emission order
    pub fn lines(&self) -> Vec<LogLine> {
        self.guard().clone()
    }

    /// Captured messages without stream information
    pub fn messages(&self) -> Vec<String> {
        self.guard().iter().map(|l| l.message.clone()).collect()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    fn push(&self, message: String, stream: Stream) {
        self.guard().push(LogLine { message, stream });
    }

    fn guard(&self) -> MutexGuard<'_, Vec<LogLine>> {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.push(format!("{}: {}", level.label(), message), level.stream());
    }

    fn action(&self, outcome: &ActionOutcome) {
        self.push(outcome.plain(), Stream::Stdout);
    }

    fn spinner(&self, message: &str) -> Box<dyn Spinner + '_> {
        self.push(format!("wait: {}", message), Stream::Stdout);
        Box::new(MemorySpinner { logger: self })
    }
}

struct MemorySpinner<'a> {
    logger: &'a MemoryLogger,
}

impl Spinner for MemorySpinner<'_> {
    fn update(&mut self, message: &str) {
        self.logger
            .push(format!("wait: {}", message), Stream::Stdout);
    }

    fn stop(&mut self) {}
}
