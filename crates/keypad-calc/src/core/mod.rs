//! Arithmetic core: tokens, parser, evaluator and result formatting
//!
//! Everything here is pure: no state survives a call, so the engine can
//! reject a malformed expression without touching its own fields.

pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use format::NumberFormat;
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Expression had no tokens
    #[error("Empty expression")]
    EmptyExpression,

    /// Expression structure is invalid
    #[error("Invalid expression: {0}")]
    ParseError(String),

    /// A token appeared where it is not allowed
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Offending token text
        token: String,
        /// Zero-based token index
        position: usize,
    },

    /// A piece of the expression is not a number literal
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,

    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,

    /// Invalid result (NaN or other)
    #[error("Invalid result: {0}")]
    InvalidResult(String),

    /// Character does not name a keypad key
    #[error("Unknown key: '{0}'")]
    UnknownKey(char),

    /// Current number cannot be read as a finite value
    #[error("Not a number: '{0}'")]
    NotANumber(String),
}

impl CalcError {
    /// Returns true for errors raised while reading the expression text
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::EmptyExpression
                | Self::ParseError(_)
                | Self::UnexpectedToken { .. }
                | Self::InvalidNumber(_)
        )
    }

    /// Returns true for errors raised by the arithmetic itself
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::DivisionByZero | Self::Overflow | Self::InvalidResult(_)
        )
    }
}
