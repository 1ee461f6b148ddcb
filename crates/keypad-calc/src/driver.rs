//! Calculator driver abstraction
//!
//! Anything that can receive key presses and show a display implements
//! [`CalculatorDriver`]. The `verify_*` routines below assert the keypad's
//! behavior against any driver, so a front end wrapping the engine can run
//! the same checks as the engine itself.

use crate::core::CalcResult;
use crate::engine::ExpressionEngine;
use crate::keypad::{parse_keys, Key};

/// Abstract driver trait for keypad interactions
pub trait CalculatorDriver {
    /// Sends one key press
    fn press(&mut self, key: Key);

    /// Gets the text on the screen
    fn display(&self) -> String;

    /// Gets the running expression
    fn expression(&self) -> String;

    /// Resets the calculator
    fn clear(&mut self) {
        self.press(Key::Clear);
    }

    /// Sends a key sequence written in key notation
    fn press_all(&mut self, sequence: &str) -> CalcResult<()> {
        for key in parse_keys(sequence)? {
            self.press(key);
        }
        Ok(())
    }
}

/// Driver over an in-process [`ExpressionEngine`]
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: ExpressionEngine,
}

impl EngineDriver {
    /// Creates a driver over a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver over an existing engine
    #[must_use]
    pub fn with_engine(engine: ExpressionEngine) -> Self {
        Self { engine }
    }

    /// Returns a reference to the underlying engine
    #[must_use]
    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Returns a mutable reference to the underlying engine
    pub fn engine_mut(&mut self) -> &mut ExpressionEngine {
        &mut self.engine
    }

    /// Consumes the driver, returning the engine
    #[must_use]
    pub fn into_engine(self) -> ExpressionEngine {
        self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, key: Key) {
        self.engine.press(key);
    }

    fn display(&self) -> String {
        self.engine.display_value().to_string()
    }

    fn expression(&self) -> String {
        self.engine.expression().to_string()
    }

    fn clear(&mut self) {
        self.engine.clear();
    }
}

#[allow(clippy::panic)]
fn press_all_or_panic<D: CalculatorDriver>(driver: &mut D, sequence: &str) {
    if let Err(e) = driver.press_all(sequence) {
        panic!("invalid key sequence {sequence:?}: {e}");
    }
}

// ===== Verification routines =====
// These work with ANY CalculatorDriver implementation

/// Verifies digit entry mirrors the display and operators pad the expression
pub fn verify_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_all_or_panic(driver, "4096");
    assert_eq!(driver.display(), "4096");
    assert_eq!(driver.expression(), driver.display());

    driver.clear();
    press_all_or_panic(driver, "12+3");
    assert_eq!(driver.expression(), "12 + 3");
    assert_eq!(driver.display(), "3");
    driver.clear();
}

/// Verifies equals shows the result and the next digit starts over
pub fn verify_equals_then_fresh_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_all_or_panic(driver, "12+3=");
    assert_eq!(driver.display(), "15");
    assert_eq!(driver.expression(), "15");

    press_all_or_panic(driver, "4");
    assert_eq!(driver.display(), "4");
    assert_eq!(driver.expression(), "4");
    driver.clear();
}

/// Verifies percent divides the current number by 100
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_all_or_panic(driver, "50%");
    assert_eq!(driver.display(), "0.5");
    assert_eq!(driver.expression(), "0.5");
    driver.clear();
}

/// Verifies the sign key toggles
pub fn verify_negate<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_all_or_panic(driver, "7±");
    assert_eq!(driver.display(), "-7");
    assert_eq!(driver.expression(), "-7");

    press_all_or_panic(driver, "±");
    assert_eq!(driver.display(), "7");
    driver.clear();
}

/// Verifies a dangling operator at equals changes nothing
pub fn verify_failed_evaluation_is_ignored<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    press_all_or_panic(driver, "÷");
    assert_eq!(driver.expression(), "0 ÷ ");

    press_all_or_panic(driver, "=");
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.expression(), "0 ÷ ");
    driver.clear();
}

/// Verifies clear returns to the initial display
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    press_all_or_panic(driver, "9×9=±.5");
    driver.clear();
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.expression(), "0");

    press_all_or_panic(driver, "1");
    assert_eq!(driver.expression(), "1");
    driver.clear();
}

/// Runs every verification routine in order
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_entry(driver);
    verify_equals_then_fresh_entry(driver);
    verify_percent(driver);
    verify_negate(driver);
    verify_failed_evaluation_is_ignored(driver);
    verify_clear(driver);
}
