//! Configure operation submodules

pub mod command;
pub mod orchestrator;

pub use command::{ConfigureCommand, ConfigureOptions};
pub use orchestrator::ConfigureOperation;
