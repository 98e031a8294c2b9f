// Domain error kinds shared by every calculator and the quote ledger
use super::quote::ItemId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    /// A value is missing, non-numeric, out of range or an unknown option.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The referenced quote item does not exist in the ledger.
    #[error("quote item {0} not found")]
    NotFound(ItemId),
}

impl QuoteError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;

/// Rejects NaN and infinities, naming the offending field.
pub(crate) fn require_finite(field: &str, value: f64) -> QuoteResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuoteError::invalid(format!("{field} must be a number, got {value}")))
    }
}

pub(crate) fn require_positive(field: &str, value: f64) -> QuoteResult<f64> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(QuoteError::invalid(format!("{field} must be greater than 0, got {value}")))
    }
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> QuoteResult<f64> {
    let value = require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(QuoteError::invalid(format!("{field} must not be negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert_eq!(require_positive("width", 2.0), Ok(2.0));
        assert!(matches!(require_positive("width", 0.0), Err(QuoteError::InvalidInput(_))));
        assert!(matches!(require_finite("width", f64::NAN), Err(QuoteError::InvalidInput(_))));
        assert_eq!(require_non_negative("fees", 0.0), Ok(0.0));
        assert!(require_non_negative("fees", -1.0).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(QuoteError::NotFound(7).to_string(), "quote item 7 not found");
        assert_eq!(
            QuoteError::invalid("unit is required").to_string(),
            "invalid input: unit is required"
        );
    }
}
