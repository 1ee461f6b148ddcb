//! Keypad calculator CLI library
//!
//! Terminal front end over [`keypad_calc`]: presses key sequences, evaluates
//! expressions and runs a line-oriented session.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

mod commands;
mod config;
mod error;
mod runner;

pub use commands::{Cli, Commands, EvalArgs, PressArgs, ReplArgs};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::{run_eval, run_press, run_repl};

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber; `RUST_LOG` overrides the verbosity
pub fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Builds the CLI configuration from parsed arguments
#[must_use]
pub fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_engine_config_path(cli.config.clone())
}
