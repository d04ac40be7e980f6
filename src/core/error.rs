//! Error types for level construction and configuration loading.
//!
//! The simulation itself has no failure modes: crashes and fuel exhaustion
//! are ordinary session states. Everything here is rejected up front, when a
//! level, pad, terrain or config is built.

use std::fmt;
use std::io;

/// Top-level error enum for Orbital Delivery.
#[derive(Debug)]
pub enum DeliveryError {
    /// Difficulty levels start at 1.
    InvalidDifficulty {
        /// The level that was rejected.
        level: u32,
    },

    /// A tuning value is outside the range the simulation can work with.
    InvalidParameter {
        /// Name of the parameter (matches the config key).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// An explicitly placed landing pad does not fit on screen.
    PadOutOfBounds {
        x: f64,
        width: f64,
        screen_width: f64,
    },

    /// The config file could not be read.
    ConfigIo(io::Error),

    /// The config file is not valid JSON for [`crate::core::config::DeliveryConfig`].
    ConfigParse(serde_json::Error),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::InvalidDifficulty { level } => {
                write!(f, "difficulty level must be at least 1, got {}", level)
            }
            DeliveryError::InvalidParameter {
                name,
                value,
                expected,
            } => write!(
                f,
                "parameter '{}' = {} is outside the accepted range {}",
                name, value, expected
            ),
            DeliveryError::PadOutOfBounds {
                x,
                width,
                screen_width,
            } => write!(
                f,
                "landing pad at x={} with width {} does not fit a screen {} wide",
                x, width, screen_width
            ),
            DeliveryError::ConfigIo(e) => write!(f, "could not read config: {}", e),
            DeliveryError::ConfigParse(e) => write!(f, "could not parse config: {}", e),
        }
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeliveryError::ConfigIo(e) => Some(e),
            DeliveryError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DeliveryError {
    fn from(e: io::Error) -> Self {
        DeliveryError::ConfigIo(e)
    }
}

impl From<serde_json::Error> for DeliveryError {
    fn from(e: serde_json::Error) -> Self {
        DeliveryError::ConfigParse(e)
    }
}

/// Convenience alias: a `Result` using `DeliveryError` as the error type.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Returns an error unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> DeliveryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DeliveryError::InvalidParameter {
            name,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn ensure_non_negative(name: &'static str, value: f64) -> DeliveryResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DeliveryError::InvalidParameter {
            name,
            value,
            expected: "[0.0, ∞)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("gravity", 0.05).is_ok());
        assert!(ensure_positive("gravity", 0.0).is_err());
        assert!(ensure_positive("gravity", -1.0).is_err());
        assert!(ensure_positive("gravity", f64::NAN).is_err());
        assert!(ensure_positive("gravity", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("margin", 0.0).is_ok());
        assert!(ensure_non_negative("margin", 12.5).is_ok());
        assert!(ensure_non_negative("margin", -0.1).is_err());
    }

    #[test]
    fn test_display_messages() {
        let err = DeliveryError::InvalidDifficulty { level: 0 };
        assert_eq!(err.to_string(), "difficulty level must be at least 1, got 0");

        let err = DeliveryError::PadOutOfBounds {
            x: 750.0,
            width: 100.0,
            screen_width: 800.0,
        };
        assert!(err.to_string().contains("x=750"));
    }

    #[test]
    fn test_parse_error_has_source() {
        use std::error::Error;

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DeliveryError::from(parse);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("could not parse config"));
    }
}
