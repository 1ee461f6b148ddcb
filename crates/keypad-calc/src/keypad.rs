//! Keypad key events
//!
//! The presentation layer owns the button grid; the engine only sees which
//! key was pressed. Key sequences can also be written as plain text, one
//! character per key, which is what the tests and the CLI use.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Operation};

/// A single keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A digit; construct with [`Key::digit`] to keep it in `0..=9`
    Digit(u8),
    /// Decimal separator
    Decimal,
    /// Binary operator
    Operator(Operation),
    /// Evaluate the running expression
    Equals,
    /// Divide the current number by 100
    Percent,
    /// Flip the sign of the current number
    Negate,
    /// Reset all state
    Clear,
}

impl Key {
    /// Creates a digit key, or None when `d` is not a single decimal digit
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Returns the label printed on the keypad button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ",".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Percent => "%".to_string(),
            Self::Negate => "±".to_string(),
            Self::Clear => "AC".to_string(),
        }
    }

    /// Maps one character of key-sequence notation to a key
    pub fn from_char(ch: char) -> CalcResult<Self> {
        let key = match ch {
            '0'..='9' => Self::Digit(ch as u8 - b'0'),
            '.' | ',' => Self::Decimal,
            '+' => Self::Operator(Operation::Add),
            '-' | '−' => Self::Operator(Operation::Subtract),
            '*' | 'x' | '×' => Self::Operator(Operation::Multiply),
            '/' | '÷' => Self::Operator(Operation::Divide),
            '=' => Self::Equals,
            '%' => Self::Percent,
            '±' | 'n' | 'N' => Self::Negate,
            'c' | 'C' => Self::Clear,
            other => return Err(CalcError::UnknownKey(other)),
        };
        Ok(key)
    }

    /// Returns true for keys that only edit the operand being typed
    #[must_use]
    pub const fn is_entry(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Decimal)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses a key-sequence string, ignoring whitespace
///
/// Nothing is returned unless every character names a key.
pub fn parse_keys(sequence: &str) -> CalcResult<Vec<Key>> {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(Key::from_char)
        .collect()
}

impl FromStr for Key {
    type Err = CalcError;

    /// Accepts a button label (`AC`, `±`, `×`, ...) or a one-character key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ac") {
            return Ok(Self::Clear);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Self::from_char(ch),
            (Some(ch), Some(_)) | (None, Some(ch)) => Err(CalcError::UnknownKey(ch)),
            (None, None) => Err(CalcError::UnknownKey(' ')),
        }
    }
}

/// Every key on the standard keypad, row by row
#[must_use]
pub fn all_keys() -> Vec<Key> {
    use Operation::{Add, Divide, Multiply, Subtract};
    vec![
        Key::Clear,
        Key::Negate,
        Key::Percent,
        Key::Operator(Divide),
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
        Key::Operator(Multiply),
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Operator(Subtract),
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Operator(Add),
        Key::Digit(0),
        Key::Decimal,
        Key::Equals,
    ]
}
