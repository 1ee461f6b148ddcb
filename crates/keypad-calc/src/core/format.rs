//! Display formatting for computed values

use serde::{Deserialize, Serialize};

/// How the engine renders a computed value
///
/// Large magnitudes switch to scientific notation, whole numbers drop the
/// decimal point, and everything else is rounded to a fixed number of
/// fractional digits with trailing zeros trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Magnitudes strictly above this render in scientific notation
    pub scientific_threshold: f64,
    /// Mantissa digits after the point in scientific notation
    pub scientific_digits: usize,
    /// Rounding precision for fractional values
    pub fraction_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            scientific_threshold: Self::DEFAULT_SCIENTIFIC_THRESHOLD,
            scientific_digits: Self::DEFAULT_SCIENTIFIC_DIGITS,
            fraction_digits: Self::DEFAULT_FRACTION_DIGITS,
        }
    }
}

impl NumberFormat {
    /// Default scientific-notation threshold
    pub const DEFAULT_SCIENTIFIC_THRESHOLD: f64 = 1e10;
    /// Default scientific mantissa precision
    pub const DEFAULT_SCIENTIFIC_DIGITS: usize = 2;
    /// Default fractional precision
    pub const DEFAULT_FRACTION_DIGITS: usize = 8;

    /// Creates the default format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scientific-notation threshold
    #[must_use]
    pub const fn with_scientific_threshold(mut self, threshold: f64) -> Self {
        self.scientific_threshold = threshold;
        self
    }

    /// Set the scientific mantissa precision
    #[must_use]
    pub const fn with_scientific_digits(mut self, digits: usize) -> Self {
        self.scientific_digits = digits;
        self
    }

    /// Set the fractional precision
    #[must_use]
    pub const fn with_fraction_digits(mut self, digits: usize) -> Self {
        self.fraction_digits = digits;
        self
    }

    /// Formats a value for display
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if value.abs() > self.scientific_threshold {
            return self.scientific(value);
        }

        if value % 1.0 == 0.0 {
            return format!("{value:.0}");
        }

        let fixed = format!("{value:.prec$}", prec = self.fraction_digits);
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }

    /// `1.23e+11` style: signed exponent with at least two digits
    fn scientific(&self, value: f64) -> String {
        let raw = format!("{value:.prec$e}", prec = self.scientific_digits);
        let Some((mantissa, exponent)) = raw.split_once('e') else {
            return raw;
        };
        match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => raw,
        }
    }
}

/// Formats a value with the default policy
#[must_use]
pub fn format_result(value: f64) -> String {
    NumberFormat::default().format(value)
}
