// ============================================================================
// Calculator Errors
// Failure kinds raised by parsing, validation and arithmetic
// ============================================================================

use thiserror::Error;

/// Errors raised by the validation-and-computation pipeline.
///
/// Every variant carries a human-readable message that can be shown to the
/// caller as-is (except [`CoreError::Internal`], whose detail is for logs).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Request body is not a JSON object
    #[error("{message}")]
    MalformedPayload { message: String },

    /// Operand missing, empty, non-numeric, non-finite or out of range
    #[error("{message}")]
    InvalidNumber { message: String },

    /// Operation token missing or unrecognised
    #[error("{message}")]
    UnsupportedOperation { message: String },

    /// Divisor is exactly zero
    #[error("{message}")]
    DivisionByZero { message: String },

    /// Arithmetic failure not covered above (result out of range)
    #[error("{message}")]
    Calculation { message: String },

    /// Anything unexpected; indicates a defect
    #[error("internal failure: {message}")]
    Internal { message: String },
}

impl CoreError {
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    pub fn invalid_number(message: impl Into<String>) -> Self {
        Self::InvalidNumber {
            message: message.into(),
        }
    }

    pub fn unsupported_operation(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            message: message.into(),
        }
    }

    pub fn division_by_zero() -> Self {
        Self::DivisionByZero {
            message: "Cannot divide by zero".to_string(),
        }
    }

    pub fn calculation(message: impl Into<String>) -> Self {
        Self::Calculation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The message carried by the error, without any prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::MalformedPayload { message }
            | CoreError::InvalidNumber { message }
            | CoreError::UnsupportedOperation { message }
            | CoreError::DivisionByZero { message }
            | CoreError::Calculation { message }
            | CoreError::Internal { message } => message,
        }
    }

    /// True for failures caused by the shape or content of the request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::MalformedPayload { .. }
                | CoreError::InvalidNumber { .. }
                | CoreError::UnsupportedOperation { .. }
        )
    }
}

/// Result type alias for calculator operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building a [`DecimalContext`](super::DecimalContext).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("decimal precision must be at least 1, got {value}")]
    InvalidPrecision { value: u32 },

    #[error("unsupported rounding mode: '{0}'")]
    UnsupportedRounding(String),
}
