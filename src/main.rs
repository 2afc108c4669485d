//! Rigup - package configuration for host projects
//!
//! Runs a package's setup contract against a host project: publishes
//! templated stubs, registers providers and meta files in the rc file, and
//! installs dependencies with the project's own dependency manager.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod commands;
mod common;
mod config;
mod error;
mod installer;
mod operations;
mod project;
mod rcfile;
mod resolver;
mod stubs;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Configure(args) => commands::configure::run(cli.project, cli.verbose, args),
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(args).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(help) = e.help() {
                eprintln!("  help: {}", help);
            }
            std::process::exit(1);
        }
    }
}
