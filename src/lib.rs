// ============================================================================
// WebCalc Library
// Exact decimal arithmetic behind a small JSON API
// ============================================================================

//! # WebCalc
//!
//! A calculator that performs arbitrary decimal arithmetic without binary
//! floating-point error, exposed over HTTP.
//!
//! ## Features
//!
//! - **Exact decimals** of any length backed by `bigdecimal`, so `1.1 + 2.2 = 3.3`
//! - **Configurable context**: significant digits and rounding mode
//! - **Forgiving input**: operands as strings or JSON numbers, operation aliases
//! - **Uniform envelopes** with stable error codes
//!
//! ## Example
//!
//! ```rust
//! use webcalc::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let calculator = CalculatorBuilder::new()
//!     .event_handler(Arc::new(NoOpEventHandler))
//!     .build()
//!     .unwrap();
//!
//! let result = calculator
//!     .calculate(&json!({"operand1": "1.1", "operand2": "2.2", "operation": "+"}))
//!     .unwrap();
//! assert_eq!(result.result_text(), "3.3");
//! assert_eq!(result.operation, Operation::Add);
//! ```

#[cfg(feature = "server")]
pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    #[cfg(feature = "server")]
    pub use crate::api::{router, ApiError, AppState, Envelope, ErrorCode};
    pub use crate::config::{ConfigError, Settings};
    pub use crate::domain::{validate_payload, CalculationRequest, CalculationResult, Operation};
    pub use crate::engine::{create_from_settings, Calculator, CalculatorBuilder};
    pub use crate::interfaces::{
        CalculationEvent, EventHandler, LoggingEventHandler, NoOpEventHandler,
    };
    pub use crate::numeric::{
        parse_decimal, CoreError, CoreResult, DecimalContext, DecimalNumber, RoundingMode,
    };
}
