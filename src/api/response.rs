// ============================================================================
// Response Envelopes
// Success and error bodies plus the mapping from failures to HTTP status
// ============================================================================

use crate::domain::CalculationResult;
use crate::numeric::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Message returned for every internal failure; details stay in the log
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Message returned when the body is not valid JSON
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    ValidationError,
    DivisionByZero,
    CalculationError,
    ServerError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::DivisionByZero => "division_by_zero",
            ErrorCode::CalculationError => "calculation_error",
            ErrorCode::ServerError => "server_error",
        }
    }

    /// HTTP status paired with the code
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<&CoreError> for ErrorCode {
    fn from(error: &CoreError) -> Self {
        match error {
            CoreError::MalformedPayload { .. }
            | CoreError::InvalidNumber { .. }
            | CoreError::UnsupportedOperation { .. } => ErrorCode::ValidationError,
            CoreError::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            CoreError::Calculation { .. } => ErrorCode::CalculationError,
            CoreError::Internal { .. } => ErrorCode::ServerError,
        }
    }
}

/// Body of the `data` member on success. Every number is rendered as text
/// so no precision is lost in transit: operands in scientific-string form,
/// the result in fixed-point form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationData {
    pub operand1: String,
    pub operand2: String,
    pub operation: String,
    pub result: String,
    pub timestamp: String,
}

impl From<&CalculationResult> for CalculationData {
    fn from(result: &CalculationResult) -> Self {
        let (operand1, operand2) = result.operand_texts();
        Self {
            operand1,
            operand2,
            operation: result.operation.as_str().to_string(),
            result: result.result_text(),
            timestamp: result.timestamp_text(),
        }
    }
}

/// Body of the `error` member on failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// `{"status": "success", "data": ...}` or `{"status": "error", "error": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success { data: CalculationData },
    Error { error: ErrorBody },
}

/// A failure ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_json() -> Self {
        Self::new(ErrorCode::InvalidJson, INVALID_JSON_MESSAGE)
    }

    pub fn server_error() -> Self {
        Self::new(ErrorCode::ServerError, INTERNAL_ERROR_MESSAGE)
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let code = ErrorCode::from(&error);
        match code {
            ErrorCode::ServerError => Self::server_error(),
            _ => Self::new(code, error.message()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        let envelope = Envelope::Error {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(envelope)).into_response()
    }
}

/// 200 response for a finished calculation
pub fn success(result: &CalculationResult) -> Response {
    let envelope = Envelope::Success {
        data: CalculationData::from(result),
    };
    (StatusCode::OK, Json(envelope)).into_response()
}
