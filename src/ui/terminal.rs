//! Terminal logger rendering colored notices

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use super::{ActionOutcome, Level, Logger, Spinner};

/// Logger printing to stdout/stderr with `console` styling
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalLogger {
    verbose: bool,
}

impl TerminalLogger {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn level_style(level: Level) -> Style {
        match level {
            Level::Info => Style::new().blue(),
            Level::Success => Style::new().green(),
            Level::Warning => Style::new().yellow(),
            Level::Error => Style::new().red(),
        }
    }
}

impl Logger for TerminalLogger {
    fn log(&self, level: Level, message: &str) {
        let label = Self::level_style(level).apply_to(level.label());
        match level {
            Level::Error => eprintln!("[ {} ] {}", label, message),
            _ => println!("[ {} ] {}", label, message),
        }
    }

    fn action(&self, outcome: &ActionOutcome) {
        match outcome {
            ActionOutcome::Done { action } => {
                println!("{}    {}", Style::new().green().apply_to("DONE:"), action);
            }
            ActionOutcome::Skipped { action, reason } => {
                println!(
                    "{} {} {}",
                    Style::new().cyan().apply_to("SKIPPED:"),
                    action,
                    Style::new().dim().apply_to(format!("({})", reason))
                );
            }
        }
    }

    fn spinner(&self, message: &str) -> Box<dyn Spinner + '_> {
        let pb = if self.verbose {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("[ {spinner:.cyan} ] {msg}")
            {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Box::new(TerminalSpinner { pb })
    }
}

struct TerminalSpinner {
    pb: ProgressBar,
}

impl Spinner for TerminalSpinner {
    fn update(&mut self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn stop(&mut self) {
        self.pb.finish();
    }
}

impl Drop for TerminalSpinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.abandon();
        }
    }
}
