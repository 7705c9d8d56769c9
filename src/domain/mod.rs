// ============================================================================
// Domain Models Module
// Operations, validated requests and calculation results
// ============================================================================

pub mod operation;
pub mod request;
pub mod result;

pub use operation::Operation;
pub use request::{
    validate_payload, CalculationRequest, OPERAND1_FIELD, OPERAND2_FIELD, OPERATION_FIELD,
};
pub use result::CalculationResult;
