// ============================================================================
// Event Handler Interface
// Defines the contract for observing calculation outcomes
// ============================================================================

use crate::domain::{CalculationRequest, CalculationResult};
use crate::numeric::CoreError;
use chrono::{DateTime, Utc};

/// Events emitted by the calculator
#[derive(Debug, Clone)]
pub enum CalculationEvent {
    /// Payload validated, about to compute
    RequestValidated {
        request: CalculationRequest,
        timestamp: DateTime<Utc>,
    },

    /// Calculation succeeded
    CalculationCompleted { result: CalculationResult },

    /// Validation or arithmetic failed
    CalculationRejected {
        error: CoreError,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing calculator events
/// Implementations can handle logging, metrics, auditing, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a calculation event
    fn on_event(&self, event: CalculationEvent);
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: CalculationEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: CalculationEvent) {
        match event {
            CalculationEvent::RequestValidated { request, .. } => {
                tracing::debug!(
                    operand1 = %request.operand1(),
                    operand2 = %request.operand2(),
                    operation = %request.operation(),
                    "Parsed request"
                );
            }
            CalculationEvent::CalculationCompleted { result } => {
                tracing::info!(
                    operand1 = %result.operand1,
                    operation = %result.operation,
                    operand2 = %result.operand2,
                    result = %result.result,
                    "Calculation success"
                );
            }
            CalculationEvent::CalculationRejected { error, .. } => match error {
                CoreError::DivisionByZero { .. } => {
                    tracing::warn!(%error, "Division by zero");
                }
                CoreError::Calculation { .. } => {
                    tracing::error!(%error, "Calculator error");
                }
                CoreError::Internal { .. } => {
                    tracing::error!(?error, "Internal failure during calculation");
                }
                _ => {
                    tracing::warn!(%error, "Validation error");
                }
            },
        }
    }
}
