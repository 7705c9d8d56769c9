// ============================================================================
// Engine Module
// Contains the core arithmetic business logic
// ============================================================================

mod calculator;

pub mod factory;

pub use calculator::Calculator;
pub use factory::{create_from_settings, CalculatorBuilder};
