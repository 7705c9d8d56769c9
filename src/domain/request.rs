// ============================================================================
// Calculation Request
// Payload validation: shape check, field presence, then value parsing
// ============================================================================

use super::Operation;
use crate::numeric::{parse_decimal, CoreError, CoreResult, DecimalNumber};
use serde_json::Value;

pub const OPERAND1_FIELD: &str = "operand1";
pub const OPERAND2_FIELD: &str = "operand2";
pub const OPERATION_FIELD: &str = "operation";

/// Two parsed operands and a resolved operation.
///
/// Only obtainable through [`CalculationRequest::from_payload`], so the
/// engine never sees an unparsed operand or an unknown operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    operand1: DecimalNumber,
    operand2: DecimalNumber,
    operation: Operation,
}

impl CalculationRequest {
    /// Validate a decoded JSON payload.
    ///
    /// Checks run in a fixed order and the first failure is returned: object
    /// shape, presence of `operand1`, `operand2` and `operation`, then parsing
    /// of each field in the same order.
    ///
    /// # Errors
    /// - `MalformedPayload` if the payload is not an object
    /// - `InvalidNumber` if an operand is missing or invalid
    /// - `UnsupportedOperation` if the operation is missing or unknown
    pub fn from_payload(payload: &Value) -> CoreResult<Self> {
        let fields = payload
            .as_object()
            .ok_or_else(|| CoreError::malformed_payload("JSON object expected"))?;

        let operand1 = fields.get(OPERAND1_FIELD).ok_or_else(|| {
            CoreError::invalid_number(format!(
                "{OPERAND1_FIELD} is required and must be a numeric value"
            ))
        })?;
        let operand2 = fields.get(OPERAND2_FIELD).ok_or_else(|| {
            CoreError::invalid_number(format!(
                "{OPERAND2_FIELD} is required and must be a numeric value"
            ))
        })?;
        let operation = fields.get(OPERATION_FIELD).ok_or_else(|| {
            CoreError::unsupported_operation(format!(
                "{OPERATION_FIELD} is required and must be a supported token"
            ))
        })?;

        Ok(Self {
            operand1: parse_decimal(operand1)?,
            operand2: parse_decimal(operand2)?,
            operation: Operation::resolve(operation)?,
        })
    }

    pub fn operand1(&self) -> &DecimalNumber {
        &self.operand1
    }

    pub fn operand2(&self) -> &DecimalNumber {
        &self.operand2
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// Free-function form of [`CalculationRequest::from_payload`].
///
/// # Errors
/// See [`CalculationRequest::from_payload`].
pub fn validate_payload(payload: &Value) -> CoreResult<CalculationRequest> {
    CalculationRequest::from_payload(payload)
}
