//! cli
//!
//! Command-line interface layer for File Meta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and check option combinations
//! - Load configuration and build the shared [`commands::Context`]
//! - Run the selected operation over every file and pick the exit code
//! - Does NOT touch property sets directly
//!
//! # Exit codes
//!
//! `0` when every file succeeded, otherwise the status code of the last
//! failure (see [`crate::core::error`]). Usage errors exit with `87`.

pub mod args;
pub mod commands;

pub use args::{Cli, Operation};

use std::io::IsTerminal;

use clap::error::ErrorKind;
use clap::Parser;

use crate::core::config::Config;
use crate::core::error::ERROR_INVALID_PARAMETER;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};

/// Run the CLI application and return the process exit code.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => ERROR_INVALID_PARAMETER,
            };
        }
    };
    run_with(cli)
}

/// Run an already-parsed command line.
pub fn run_with(cli: Cli) -> i32 {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let interactive = std::io::stdin().is_terminal();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            output::error(format!("failed to load config: {err}"));
            return ERROR_INVALID_PARAMETER;
        }
    };
    if let Some(path) = config.loaded_from() {
        output::debug(format!("config: {}", path.display()), verbosity);
    }
    let prompt = cli.prompt || config.prompt();

    let code = match cli.validate() {
        Ok(()) => {
            let ctx = commands::Context {
                verbosity,
                config,
                xml: cli.xml_location(),
                console: cli.console,
                explorer: cli.explorer,
            };
            commands::dispatch(cli.operation(), &cli.files, &ctx)
        }
        Err(err) => {
            output::error(&err);
            err.status_code()
        }
    };

    if prompt {
        match prompts::pause("Press Enter to continue...", interactive) {
            Ok(()) => {}
            Err(PromptError::NotInteractive) if cli.prompt => {
                output::warn("--prompt ignored: stdin is not a terminal", verbosity);
            }
            Err(err) => output::debug(format!("skipping prompt: {err}"), verbosity),
        }
    }

    code
}
