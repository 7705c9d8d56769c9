// ============================================================================
// Calculator
// Core business logic for decimal arithmetic
// ============================================================================

use crate::domain::{CalculationRequest, CalculationResult, Operation};
use crate::interfaces::{CalculationEvent, EventHandler};
use crate::numeric::{CoreError, CoreResult, DecimalContext, DecimalNumber};
use chrono::Utc;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Arithmetic engine bound to a fixed decimal context.
///
/// The context is set at construction and never changes, so one calculator
/// can be shared across threads behind an `Arc`.
pub struct Calculator {
    /// Precision and rounding for every result
    context: DecimalContext,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl Calculator {
    /// Create a new calculator
    pub fn new(context: DecimalContext, event_handler: Arc<dyn EventHandler>) -> Self {
        Self {
            context,
            event_handler,
        }
    }

    pub fn context(&self) -> DecimalContext {
        self.context
    }

    /// `a + b`, rounded to the context.
    ///
    /// # Errors
    /// Returns `Calculation` if the sum is out of range.
    pub fn add(&self, a: &DecimalNumber, b: &DecimalNumber) -> CoreResult<DecimalNumber> {
        self.finish(Operation::Add, self.context.add(a, b))
    }

    /// `a - b`, rounded to the context.
    ///
    /// # Errors
    /// Returns `Calculation` if the difference is out of range.
    pub fn subtract(&self, a: &DecimalNumber, b: &DecimalNumber) -> CoreResult<DecimalNumber> {
        self.finish(Operation::Subtract, self.context.subtract(a, b))
    }

    /// `a × b`, rounded to the context. Exponents add up, so `1.5 × 2 = 3.0`.
    ///
    /// # Errors
    /// Returns `Calculation` if the product is out of range.
    pub fn multiply(&self, a: &DecimalNumber, b: &DecimalNumber) -> CoreResult<DecimalNumber> {
        self.finish(Operation::Multiply, self.context.multiply(a, b))
    }

    /// `a ÷ b`, rounded to the context.
    ///
    /// # Errors
    /// - `DivisionByZero` if `b` is exactly zero
    /// - `Calculation` if the quotient is out of range
    pub fn divide(&self, a: &DecimalNumber, b: &DecimalNumber) -> CoreResult<DecimalNumber> {
        if b.is_zero() {
            return Err(CoreError::division_by_zero());
        }
        self.finish(Operation::Divide, self.context.divide(a, b))
    }

    /// Apply `operation` to `a` and `b`.
    ///
    /// # Errors
    /// See the individual operations.
    pub fn compute(
        &self,
        a: &DecimalNumber,
        b: &DecimalNumber,
        operation: Operation,
    ) -> CoreResult<DecimalNumber> {
        match operation {
            Operation::Add => self.add(a, b),
            Operation::Subtract => self.subtract(a, b),
            Operation::Multiply => self.multiply(a, b),
            Operation::Divide => self.divide(a, b),
        }
    }

    /// Validate a decoded JSON payload and compute its result.
    ///
    /// Emits `RequestValidated` once the payload is accepted, then either
    /// `CalculationCompleted` or `CalculationRejected`.
    ///
    /// # Errors
    /// Any validation or arithmetic error, unchanged.
    pub fn calculate(&self, payload: &Value) -> CoreResult<CalculationResult> {
        let outcome = self.evaluate(payload);

        let event = match &outcome {
            Ok(result) => CalculationEvent::CalculationCompleted {
                result: result.clone(),
            },
            Err(error) => CalculationEvent::CalculationRejected {
                error: error.clone(),
                timestamp: Utc::now(),
            },
        };
        self.event_handler.on_event(event);

        outcome
    }

    fn evaluate(&self, payload: &Value) -> CoreResult<CalculationResult> {
        let request = CalculationRequest::from_payload(payload)?;
        self.event_handler
            .on_event(CalculationEvent::RequestValidated {
                request: request.clone(),
                timestamp: Utc::now(),
            });

        let result = self.compute(request.operand1(), request.operand2(), request.operation())?;
        Ok(CalculationResult::new(&request, result))
    }

    fn finish(&self, operation: Operation, rounded: Option<DecimalNumber>) -> CoreResult<DecimalNumber> {
        rounded.ok_or_else(|| {
            CoreError::calculation(format!(
                "Result of {operation} exceeds the representable range"
            ))
        })
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
