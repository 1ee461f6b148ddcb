//! keypad-calc: keypad calculator in the terminal
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc press "12+3="          # 15
//! keypad-calc press "50%" --json     # {"display":"0.5","expression":"0.5"}
//! keypad-calc eval "2 + 3 × 4"       # 14
//! keypad-calc repl                   # one key sequence per line
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use keypad_calc_cli::{
    build_config, init_tracing, run_eval, run_press, run_repl, Cli, CliResult, Commands,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Press(args) => run_press(&config, &args, &mut out),
        Commands::Eval(args) => run_eval(&config, &args, &mut out),
        Commands::Repl(args) => run_repl(
            &config,
            &args,
            io::stdin().lock(),
            &mut out,
            &mut io::stderr(),
        ),
    }
}
