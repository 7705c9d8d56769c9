// ============================================================================
// Numeric Module
// Exact decimal values, parsing, precision context and error taxonomy
// ============================================================================
//
// This module provides:
// - DecimalNumber: arbitrary-precision decimal over bigdecimal::BigDecimal
// - parse_decimal: JSON operand -> DecimalNumber
// - DecimalContext / RoundingMode: precision, rounding and arithmetic
// - CoreError: failure kinds surfaced to callers
//
// Design principles:
// - No floating-point arithmetic; floats are only read through their text
// - All fallible operations return Result or Option (no panics on user input)
// - Every arithmetic result is rounded exactly once

mod context;
mod decimal;
mod errors;
mod parser;

pub use context::{DecimalContext, RoundingMode, DEFAULT_PRECISION};
pub use decimal::{DecimalNumber, MAX_EXPONENT, MIN_EXPONENT};
pub use errors::{ContextError, CoreError, CoreResult};
pub use parser::{parse_decimal, parse_decimal_str};
