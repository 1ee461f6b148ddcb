//! CLI command definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keypad calculator in the terminal
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a key sequence and print the display
    Press(PressArgs),

    /// Evaluate an expression string
    Eval(EvalArgs),

    /// Read key sequences from stdin, one per line
    Repl(ReplArgs),
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Keys, one character each: 0-9 . , + - * x / = % n c (also × ÷ ±)
    #[arg(allow_hyphen_values = true)]
    pub keys: String,

    /// Also print the running expression
    #[arg(short, long)]
    pub expression: bool,

    /// Print the display after every key
    #[arg(long)]
    pub trace: bool,

    /// Print the final snapshot as JSON
    #[arg(long, conflicts_with_all = ["expression", "trace"])]
    pub json: bool,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression with space-separated tokens, e.g. "12 + 3 × 4"
    #[arg(allow_hyphen_values = true)]
    pub expression: String,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Also print the running expression after each line
    #[arg(short, long)]
    pub expression: bool,
}
