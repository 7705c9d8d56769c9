// ============================================================================
// Calculation Result Domain Model
// ============================================================================

use super::{CalculationRequest, Operation};
use crate::numeric::DecimalNumber;
use chrono::{DateTime, SecondsFormat, Utc};

/// Outcome of a successful calculation, with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    pub operand1: DecimalNumber,
    pub operand2: DecimalNumber,
    pub operation: Operation,
    pub result: DecimalNumber,
    pub timestamp: DateTime<Utc>,
}

impl CalculationResult {
    pub fn new(request: &CalculationRequest, result: DecimalNumber) -> Self {
        Self {
            operand1: request.operand1().clone(),
            operand2: request.operand2().clone(),
            operation: request.operation(),
            result,
            timestamp: Utc::now(),
        }
    }

    /// Result in fixed-point form, never with an exponent.
    pub fn result_text(&self) -> String {
        self.result.to_plain_string()
    }

    /// Operands in scientific-string form, as they were written.
    pub fn operand_texts(&self) -> (String, String) {
        (self.operand1.to_string(), self.operand2.to_string())
    }

    /// ISO-8601 timestamp with microseconds and an explicit `+00:00` offset.
    pub fn timestamp_text(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
    }
}
