// ============================================================================
// Calculator Factory
// Creates calculators with proper configuration
// ============================================================================

use crate::config::{ConfigError, Settings};
use crate::engine::Calculator;
use crate::interfaces::{EventHandler, NoOpEventHandler};
use crate::numeric::{ContextError, DecimalContext, RoundingMode, DEFAULT_PRECISION};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a calculator from loaded settings
///
/// # Arguments
/// * `settings` - Application settings (precision and rounding are used)
/// * `event_handler` - Event handler for calculation events
///
/// # Example
/// ```
/// use webcalc::prelude::*;
/// use std::sync::Arc;
///
/// let calculator = create_from_settings(&Settings::default(), Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(calculator.context().precision(), 28);
/// ```
///
/// # Errors
/// Returns `ConfigError::Context` if precision or rounding is invalid.
pub fn create_from_settings(
    settings: &Settings,
    event_handler: Arc<dyn EventHandler>,
) -> Result<Calculator, ConfigError> {
    let context = settings.decimal_context()?;
    Ok(Calculator::new(context, event_handler))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating calculators with fluent API
///
/// # Example
/// ```
/// use webcalc::prelude::*;
/// use std::sync::Arc;
///
/// let calculator = CalculatorBuilder::new()
///     .precision(10)
///     .rounding(RoundingMode::HalfUp)
///     .event_handler(Arc::new(LoggingEventHandler))
///     .build()
///     .unwrap();
/// assert_eq!(calculator.context().precision(), 10);
/// ```
pub struct CalculatorBuilder {
    precision: u32,
    rounding: RoundingMode,
    event_handler: Arc<dyn EventHandler>,
}

impl CalculatorBuilder {
    /// Create a builder with default precision (28) and round-half-even
    pub fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::HalfEven,
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Significant digits kept in every result
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Use an existing context
    pub fn context(mut self, context: DecimalContext) -> Self {
        self.precision = context.precision();
        self.rounding = context.rounding();
        self
    }

    pub fn event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    /// Build the calculator
    ///
    /// # Errors
    /// Returns `InvalidPrecision` when the precision is zero.
    pub fn build(self) -> Result<Calculator, ContextError> {
        let context = DecimalContext::new(self.precision, self.rounding)?;
        Ok(Calculator::new(context, self.event_handler))
    }
}

impl Default for CalculatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
