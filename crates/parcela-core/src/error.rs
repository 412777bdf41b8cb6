//! Error types for the Parcela core library.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core date and calendar operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Year outside the supported calendar range.
    ///
    /// Holiday generation is defined for a fixed year range; asking for a
    /// year outside it is a caller contract violation, not a recoverable
    /// runtime condition.
    #[error("Unsupported calendar year: {year} (supported range {min}..={max})")]
    UnsupportedYear {
        /// The requested year.
        year: i32,
        /// First supported year.
        min: i32,
        /// Last supported year.
        max: i32,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an unsupported year error.
    #[must_use]
    pub fn unsupported_year(year: i32, min: i32, max: i32) -> Self {
        Self::UnsupportedYear { year, min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));

        let err = CoreError::unsupported_year(1850, 1970, 2100);
        assert!(err.to_string().contains("1850"));
        assert!(err.to_string().contains("1970..=2100"));
    }
}
