//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::NumberFormat;

/// Largest fractional precision that still means something for an `f64`
pub const MAX_FRACTION_DIGITS: usize = 17;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid JSON for [`EngineConfig`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but holds an unusable value
    #[error("Invalid config: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Configuration for an [`ExpressionEngine`](crate::engine::ExpressionEngine)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How computed values are rendered
    pub format: NumberFormat,
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number format
    #[must_use]
    pub const fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Parses and validates configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.format.scientific_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "scientific_threshold must be a positive finite number, got {threshold}"
            )));
        }
        if self.format.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(ConfigError::invalid(format!(
                "fraction_digits must be at most {MAX_FRACTION_DIGITS}, got {}",
                self.format.fraction_digits
            )));
        }
        if self.format.scientific_digits > MAX_FRACTION_DIGITS {
            return Err(ConfigError::invalid(format!(
                "scientific_digits must be at most {MAX_FRACTION_DIGITS}, got {}",
                self.format.scientific_digits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_format_override() {
        let config = EngineConfig::from_json_str(r#"{"format": {"fraction_digits": 4}}"#).unwrap();
        assert_eq!(config.format.fraction_digits, 4);
        assert_eq!(
            config.format.scientific_threshold,
            NumberFormat::DEFAULT_SCIENTIFIC_THRESHOLD
        );
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let err = EngineConfig::from_json_str(r#"{"format": {"scientific_threshold": -1.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("scientific_threshold"));
    }

    #[test]
    fn test_rejects_excess_precision() {
        let err =
            EngineConfig::from_json_str(r#"{"format": {"fraction_digits": 40}}"#).unwrap_err();
        assert!(err.to_string().contains("fraction_digits"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json_str("{format"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config =
            EngineConfig::new().with_format(NumberFormat::new().with_fraction_digits(3));
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"format": {{"scientific_digits": 4}}}}"#).unwrap();
        let config = EngineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.format.scientific_digits, 4);
    }

    #[test]
    fn test_from_missing_path() {
        assert!(matches!(
            EngineConfig::from_path("/nonexistent/keypad-calc.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
