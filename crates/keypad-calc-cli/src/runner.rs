//! Command execution
//!
//! Each command writes to a caller-supplied sink so the same code serves
//! the binary and the unit tests.

use std::io::{BufRead, Write};

use keypad_calc::prelude::*;
use tracing::{debug, info};

use crate::commands::{EvalArgs, PressArgs, ReplArgs};
use crate::config::CliConfig;
use crate::error::CliResult;

/// Runs `press`: feeds the key sequence to a fresh engine
pub fn run_press(config: &CliConfig, args: &PressArgs, out: &mut impl Write) -> CliResult<()> {
    let mut engine = ExpressionEngine::with_config(config.engine_config()?);
    let keys = parse_keys(&args.keys)?;
    info!(keys = keys.len(), "pressing key sequence");

    for key in keys {
        engine.press(key);
        if args.trace {
            writeln!(out, "{key}\t{}", engine.display_value())?;
        }
    }

    if args.json {
        serde_json::to_writer(&mut *out, &engine.snapshot())?;
        writeln!(out)?;
        return Ok(());
    }

    if !args.trace {
        writeln!(out, "{}", engine.display_value())?;
    }
    if args.expression {
        writeln!(out, "{}", engine.expression())?;
    }
    Ok(())
}

/// Runs `eval`: evaluates an expression and prints the formatted result
pub fn run_eval(config: &CliConfig, args: &EvalArgs, out: &mut impl Write) -> CliResult<()> {
    let engine_config = config.engine_config()?;
    let value = evaluate_str(&args.expression)?;
    debug!(expression = %args.expression, value, "evaluated");
    writeln!(out, "{}", engine_config.format.format(value))?;
    Ok(())
}

/// Runs `repl`: one key sequence per line against a persistent engine
///
/// A line with an unknown key is reported and skipped; the session goes on.
pub fn run_repl(
    config: &CliConfig,
    args: &ReplArgs,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> CliResult<()> {
    let mut engine = ExpressionEngine::with_config(config.engine_config()?);

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = engine.press_sequence(&line) {
            writeln!(err, "error: {e}")?;
            continue;
        }
        if config.verbosity.is_quiet() {
            continue;
        }
        writeln!(out, "{}", engine.display_value())?;
        if args.expression {
            writeln!(out, "  {}", engine.expression())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Verbosity;
    use crate::error::CliError;

    fn press_args(keys: &str) -> PressArgs {
        PressArgs {
            keys: keys.to_string(),
            expression: false,
            trace: false,
            json: false,
        }
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_press_prints_display() {
        let mut out = Vec::new();
        run_press(&CliConfig::new(), &press_args("12+3="), &mut out).unwrap();
        assert_eq!(output(out), "15\n");
    }

    #[test]
    fn test_press_with_expression() {
        let mut out = Vec::new();
        let args = PressArgs {
            expression: true,
            ..press_args("12+3")
        };
        run_press(&CliConfig::new(), &args, &mut out).unwrap();
        assert_eq!(output(out), "3\n12 + 3\n");
    }

    #[test]
    fn test_press_trace() {
        let mut out = Vec::new();
        let args = PressArgs {
            trace: true,
            ..press_args("7n")
        };
        run_press(&CliConfig::new(), &args, &mut out).unwrap();
        assert_eq!(output(out), "7\t7\n±\t-7\n");
    }

    #[test]
    fn test_press_json() {
        let mut out = Vec::new();
        let args = PressArgs {
            json: true,
            ..press_args("50%")
        };
        run_press(&CliConfig::new(), &args, &mut out).unwrap();
        assert_eq!(output(out), "{\"display\":\"0.5\",\"expression\":\"0.5\"}\n");
    }

    #[test]
    fn test_press_unknown_key() {
        let mut out = Vec::new();
        let result = run_press(&CliConfig::new(), &press_args("1(2"), &mut out);
        assert!(matches!(
            result,
            Err(CliError::Calc(CalcError::UnknownKey('(')))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_eval_prints_formatted() {
        let mut out = Vec::new();
        let args = EvalArgs {
            expression: "1 ÷ 3".into(),
        };
        run_eval(&CliConfig::new(), &args, &mut out).unwrap();
        assert_eq!(output(out), "0.33333333\n");
    }

    #[test]
    fn test_eval_error() {
        let mut out = Vec::new();
        let args = EvalArgs {
            expression: "4 ÷ 0".into(),
        };
        let result = run_eval(&CliConfig::new(), &args, &mut out);
        assert!(matches!(
            result,
            Err(CliError::Calc(CalcError::DivisionByZero))
        ));
    }

    #[test]
    fn test_repl_keeps_state_between_lines() {
        let input = "12+\n3=\n\n×2=\n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let args = ReplArgs { expression: false };
        run_repl(&CliConfig::new(), &args, input.as_bytes(), &mut out, &mut err).unwrap();
        assert_eq!(output(out), "12\n15\n30\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_repl_reports_bad_line_and_continues() {
        let input = "4?\n4\n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        let args = ReplArgs { expression: true };
        run_repl(&CliConfig::new(), &args, input.as_bytes(), &mut out, &mut err).unwrap();
        assert_eq!(output(out), "4\n  4\n");
        assert_eq!(output(err), "error: Unknown key: '?'\n");
    }

    #[test]
    fn test_repl_quiet() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let config = CliConfig::new().with_verbosity(Verbosity::Quiet);
        let args = ReplArgs { expression: false };
        run_repl(&config, &args, "1+1=\n".as_bytes(), &mut out, &mut err).unwrap();
        assert!(out.is_empty());
    }
}
