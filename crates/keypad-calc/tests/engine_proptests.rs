//! Property-based tests for the expression engine
//!
//! Random key sequences must never break the state invariants.

#![allow(clippy::unwrap_used)]

use keypad_calc::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any valid digit (0-9)
fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

/// Generate any keypad operation
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

/// Generate any key press
fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        4 => digit_strategy().prop_map(Key::Digit),
        1 => Just(Key::Decimal),
        2 => operation_strategy().prop_map(Key::Operator),
        1 => Just(Key::Equals),
        1 => Just(Key::Percent),
        1 => Just(Key::Negate),
        1 => Just(Key::Clear),
    ]
}

fn run(keys: &[Key]) -> ExpressionEngine {
    let mut engine = ExpressionEngine::new();
    for key in keys {
        engine.press(*key);
    }
    engine
}

// ===== Invariants =====

proptest! {
    /// The expression is never empty
    #[test]
    fn prop_expression_never_empty(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let engine = run(&keys);
        prop_assert!(!engine.expression().is_empty());
    }

    /// The current number holds at most one decimal point
    #[test]
    fn prop_single_decimal_point(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let engine = run(&keys);
        prop_assert!(engine.display_value().matches('.').count() <= 1);
    }

    /// Clear always returns to the initial state
    #[test]
    fn prop_clear_resets(keys in prop::collection::vec(key_strategy(), 0..40)) {
        let mut engine = run(&keys);
        engine.clear();
        prop_assert_eq!(engine.state(), &CalculatorState::default());
    }

    /// Digit-only input shows the same text on screen and in the expression
    #[test]
    fn prop_digits_mirror_expression(digits in prop::collection::vec(digit_strategy(), 1..15)) {
        let keys: Vec<Key> = digits.into_iter().map(Key::Digit).collect();
        let engine = run(&keys);
        prop_assert_eq!(engine.expression(), engine.display_value());
    }

    /// A second decimal press changes nothing
    #[test]
    fn prop_decimal_idempotent(keys in prop::collection::vec(key_strategy(), 0..30)) {
        let mut once = run(&keys);
        once.enter_decimal();
        let mut twice = run(&keys);
        twice.enter_decimal();
        twice.enter_decimal();
        prop_assert_eq!(once.state(), twice.state());
    }

    /// Rejected evaluation leaves state untouched
    #[test]
    fn prop_failed_equals_is_noop(keys in prop::collection::vec(key_strategy(), 0..30), op in operation_strategy()) {
        let mut engine = run(&keys);
        engine.enter_operation(op);
        let before = engine.state().clone();
        prop_assert!(engine.try_calculate_result().is_err());
        prop_assert_eq!(engine.state(), &before);
    }

    /// Display always reads back as a number after equals succeeds
    #[test]
    fn prop_result_display_is_numeric(a in 0u32..100_000, b in 1u32..1000, op in operation_strategy()) {
        let mut engine = ExpressionEngine::new();
        engine.press_sequence(&format!("{a}")).unwrap();
        engine.enter_operation(op);
        engine.press_sequence(&format!("{b}")).unwrap();
        engine.calculate_result();
        prop_assert!(engine.state().pending_replace);
        prop_assert!(engine.display_value().parse::<f64>().is_ok());
        prop_assert_eq!(engine.expression(), engine.display_value());
    }

    /// Negating twice restores a non-zero whole number
    #[test]
    fn prop_double_negate(n in 1u32..1_000_000) {
        let mut engine = ExpressionEngine::new();
        engine.press_sequence(&n.to_string()).unwrap();
        engine.negate();
        engine.negate();
        prop_assert_eq!(engine.display_value(), n.to_string());
        prop_assert_eq!(engine.expression(), n.to_string());
    }
}

// ===== Formatting properties =====

proptest! {
    /// Whole numbers within range never show a decimal point
    #[test]
    fn prop_whole_numbers_have_no_point(n in -9_999_999_999i64..=9_999_999_999i64) {
        let text = format_result(n as f64);
        prop_assert!(!text.contains('.'));
        prop_assert_eq!(text, n.to_string());
    }

    /// Large magnitudes use signed two-digit exponents
    #[test]
    fn prop_large_values_scientific(mantissa in 1.0f64..9.99, exp in 11i32..300) {
        let text = format_result(mantissa * 10f64.powi(exp));
        prop_assert!(text.contains("e+"), "{}", text);
        let (m, _) = text.split_once('e').unwrap();
        prop_assert_eq!(m.split_once('.').map(|(_, frac)| frac.len()), Some(2));
    }

    /// Fractional output never ends in a zero
    #[test]
    fn prop_fraction_trimmed(value in -1000.0f64..1000.0) {
        let text = format_result(value);
        if text.contains('.') {
            prop_assert!(!text.ends_with('0'));
            prop_assert!(!text.ends_with('.'));
        }
    }
}
