//! Keypad Calculator Engine
//!
//! The state machine behind a single-screen calculator: digit entry, a
//! running expression, percent, sign flip, and an evaluator that honours
//! multiplication/division before addition/subtraction. Rendering the
//! keypad is left to the caller, which sends [`Key`](keypad::Key) events
//! and reads back the display string.
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut engine = ExpressionEngine::new();
//! engine.press_sequence("12+3").unwrap();
//! assert_eq!(engine.expression(), "12 + 3");
//! assert_eq!(engine.display_value(), "3");
//!
//! engine.press(Key::Equals);
//! assert_eq!(engine.display_value(), "15");
//!
//! // A dangling operator is ignored at equals
//! engine.press_sequence("c÷=").unwrap();
//! assert_eq!(engine.display_value(), "0");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod engine;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::core::evaluator::{evaluate, evaluate_str};
    pub use crate::core::format::format_result;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, NumberFormat, Operation};
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::engine::{CalculatorState, ExpressionEngine, Snapshot, SubscriptionId};
    pub use crate::keypad::{parse_keys, Key};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        assert_eq!(evaluate_str("2 + 3 × 4"), Ok(14.0));
        assert_eq!(format_result(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_scenario_running_expression() {
        let mut engine = ExpressionEngine::new();
        engine.press_sequence("12+3").unwrap();
        assert_eq!(engine.expression(), "12 + 3");
        assert_eq!(engine.display_value(), "3");

        engine.press(Key::Equals);
        assert_eq!(engine.display_value(), "15");
        assert_eq!(engine.expression(), "15");

        engine.press(Key::Digit(4));
        assert_eq!(engine.display_value(), "4");
        assert_eq!(engine.expression(), "4");
    }

    #[test]
    fn test_scenario_percent_and_sign() {
        let mut engine = ExpressionEngine::new();
        engine.press_sequence("50%").unwrap();
        assert_eq!(engine.snapshot().display, "0.5");

        engine.clear();
        engine.press_sequence("7±").unwrap();
        assert_eq!(engine.display_value(), "-7");
        engine.press(Key::Negate);
        assert_eq!(engine.display_value(), "7");
    }

    #[test]
    fn test_scenario_dangling_divide() {
        let mut engine = ExpressionEngine::new();
        engine.press_sequence("÷=").unwrap();
        assert_eq!(engine.display_value(), "0");
        assert_eq!(engine.expression(), "0 ÷ ");
    }

    #[test]
    fn test_driver_through_prelude() {
        let mut driver = EngineDriver::new();
        driver.press_all("6×7=").unwrap();
        assert_eq!(driver.display(), "42");
    }
}
