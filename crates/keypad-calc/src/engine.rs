//! Calculator state machine
//!
//! [`ExpressionEngine`] turns key presses into a running expression and a
//! display value. Rejected operations (a malformed expression at equals, a
//! current number that does not read as a finite value) leave the state
//! untouched and are only visible through the `try_*` variants and logs.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::core::evaluator::evaluate_str;
use crate::core::{CalcError, CalcResult, NumberFormat, Operation};
use crate::keypad::{parse_keys, Key};

/// Complete calculator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Running token stream since the last clear or result; never empty
    pub expression: String,
    /// Literal text of the operand being typed
    pub current_number: String,
    /// Next digit starts a fresh operand
    pub is_entering_new_number: bool,
    /// Most recent computed result
    pub last_result: Option<f64>,
    /// Next digit or decimal discards the displayed result first
    pub pending_replace: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            expression: "0".to_string(),
            current_number: "0".to_string(),
            is_entering_new_number: true,
            last_result: None,
            pending_replace: false,
        }
    }
}

/// What a listener sees after each state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Text on the screen
    pub display: String,
    /// Running expression
    pub expression: String,
}

/// Handle returned by [`ExpressionEngine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

/// The keypad calculator
pub struct ExpressionEngine {
    state: CalculatorState,
    format: NumberFormat,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ExpressionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpressionEngine")
            .field("state", &self.state)
            .field("format", &self.format)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for ExpressionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionEngine {
    /// Creates an engine in the cleared state
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine using the given configuration
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: CalculatorState::default(),
            format: config.format,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // ===== Reading =====

    /// Text the screen shows
    #[must_use]
    pub fn display_value(&self) -> &str {
        &self.state.current_number
    }

    /// Full running expression
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.state.expression
    }

    /// Most recent computed result
    #[must_use]
    pub fn last_result(&self) -> Option<f64> {
        self.state.last_result
    }

    /// Full state, for inspection
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current display and expression
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.state.current_number.clone(),
            expression: self.state.expression.clone(),
        }
    }

    // ===== Observers =====

    /// Registers a listener called with a snapshot after every state change
    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Runs `op` and notifies listeners if the state changed
    fn transition<T>(&mut self, op: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.state.clone();
        let out = op(self);
        if self.state != before && !self.listeners.is_empty() {
            let snapshot = self.snapshot();
            for (_, listener) in &mut self.listeners {
                listener(&snapshot);
            }
        }
        out
    }

    // ===== Key dispatch =====

    /// Dispatches a key to its operation
    pub fn press(&mut self, key: Key) {
        trace!(%key, "key pressed");
        match key {
            Key::Digit(d) => self.enter_digit(d),
            Key::Decimal => self.enter_decimal(),
            Key::Operator(op) => self.enter_operation(op),
            Key::Equals => self.calculate_result(),
            Key::Percent => self.apply_percentage(),
            Key::Negate => self.negate(),
            Key::Clear => self.clear(),
        }
    }

    /// Parses a key sequence and presses each key in order
    ///
    /// Nothing is pressed if any character is not a key.
    pub fn press_sequence(&mut self, sequence: &str) -> CalcResult<()> {
        for key in parse_keys(sequence)? {
            self.press(key);
        }
        Ok(())
    }

    // ===== Operations =====

    /// Enters a digit; values above 9 are ignored
    pub fn enter_digit(&mut self, digit: u8) {
        if digit > 9 {
            debug!(digit, "ignoring out-of-range digit");
            return;
        }
        self.transition(|engine| engine.apply_digit(char::from(b'0' + digit)));
    }

    fn apply_digit(&mut self, digit: char) {
        self.reset_if_pending();
        let state = &mut self.state;

        if state.is_entering_new_number {
            state.current_number = digit.to_string();
            state.is_entering_new_number = false;
        } else if state.current_number == "0" {
            state.current_number = digit.to_string();
        } else {
            state.current_number.push(digit);
        }

        if state.expression == "0" {
            state.expression = digit.to_string();
        } else {
            state.expression.push(digit);
        }
    }

    /// Enters a decimal point; a second point in the same number is ignored
    pub fn enter_decimal(&mut self) {
        self.transition(|engine| {
            engine.reset_if_pending();
            let state = &mut engine.state;

            if state.is_entering_new_number {
                state.current_number = "0.".to_string();
                state.expression.push_str("0.");
                state.is_entering_new_number = false;
            } else if !state.current_number.contains('.') {
                state.current_number.push('.');
                state.expression.push('.');
            }
        });
    }

    /// Appends an operator; the next digit starts a new operand
    pub fn enter_operation(&mut self, op: Operation) {
        self.transition(|engine| {
            let state = &mut engine.state;
            if state.pending_replace {
                state.expression = state.current_number.clone();
                state.pending_replace = false;
            }
            state.is_entering_new_number = true;
            state.expression.push(' ');
            state.expression.push_str(op.symbol());
            state.expression.push(' ');
        });
    }

    /// Evaluates the running expression; failures leave the state unchanged
    pub fn calculate_result(&mut self) {
        if let Err(err) = self.try_calculate_result() {
            debug!(expression = %self.state.expression, %err, "evaluation rejected");
        }
    }

    /// Evaluates the running expression, reporting why it was rejected
    pub fn try_calculate_result(&mut self) -> CalcResult<f64> {
        let result = evaluate_str(&self.state.expression)?;
        let formatted = self.format.format(result);
        debug!(expression = %self.state.expression, result = %formatted, "evaluated");

        self.transition(|engine| {
            let state = &mut engine.state;
            state.last_result = Some(result);
            state.expression.clone_from(&formatted);
            state.current_number = formatted;
            state.pending_replace = true;
        });
        Ok(result)
    }

    /// Divides the current number by 100
    pub fn apply_percentage(&mut self) {
        if let Err(err) = self.try_apply_percentage() {
            debug!(%err, "percentage rejected");
        }
    }

    /// Divides the current number by 100, reporting a non-numeric operand
    pub fn try_apply_percentage(&mut self) -> CalcResult<()> {
        let value = self.current_value()?;
        self.replace_current(value / 100.0);
        Ok(())
    }

    /// Flips the sign of the current number
    pub fn negate(&mut self) {
        if let Err(err) = self.try_negate() {
            debug!(%err, "negate rejected");
        }
    }

    /// Flips the sign of the current number, reporting a non-numeric operand
    pub fn try_negate(&mut self) -> CalcResult<()> {
        let value = self.current_value()?;
        self.replace_current(-value);
        Ok(())
    }

    /// Resets everything to the initial state
    pub fn clear(&mut self) {
        self.transition(|engine| engine.state = CalculatorState::default());
    }

    // ===== Helpers =====

    fn reset_if_pending(&mut self) {
        if self.state.pending_replace {
            self.state = CalculatorState::default();
        }
    }

    fn current_value(&self) -> CalcResult<f64> {
        let text = &self.state.current_number;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(CalcError::NotANumber(text.clone())),
        }
    }

    /// Stores a new current number and swaps it in for the last expression piece
    fn replace_current(&mut self, value: f64) {
        let formatted = self.format.format(value);
        self.transition(|engine| {
            let state = &mut engine.state;
            let mut pieces: Vec<&str> = state.expression.split(' ').collect();
            pieces.pop();
            let mut expression = pieces.join(" ");
            if !expression.is_empty() {
                expression.push(' ');
            }
            expression.push_str(&formatted);
            state.expression = expression;
            state.current_number = formatted;
        });
    }
}
