//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - configure: Configure command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod configure;

pub use completions::CompletionsArgs;
pub use configure::ConfigureArgs;

/// Rigup - package configuration for host projects
///
/// Publish a package's stubs, register its providers and install its dependencies.
#[derive(Parser, Debug)]
#[command(
    name = "rigup",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Configure packages inside a host project",
    long_about = "Rigup runs a package's setup contract against a host project: it publishes \
                  templated stubs, registers providers and meta files in the rc file, and \
                  installs dependencies with the project's own dependency manager.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  rigup configure ./packages/cors        \x1b[90m# Configure a local package\x1b[0m\n   \
                  rigup configure @acme/cors --force     \x1b[90m# Overwrite existing files\x1b[0m\n   \
                  rigup configure vinejs                 \x1b[90m# Register a built-in provider\x1b[0m\n   \
                  rigup configure ./pkg --no-install     \x1b[90m# Print install commands instead\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "RIGUP_PROJECT")]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure a package inside the project
    Configure(ConfigureArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
