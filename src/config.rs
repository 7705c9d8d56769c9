// ============================================================================
// Application Configuration
// Settings read once at startup from defaults and environment variables
// ============================================================================

use crate::numeric::{ContextError, DecimalContext, RoundingMode, DEFAULT_PRECISION};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variables consulted by [`Settings::load`].
pub const ENV_KEYS: [&str; 6] = [
    "DECIMAL_PRECISION",
    "DECIMAL_ROUNDING",
    "LOG_LEVEL",
    "LOG_FILE",
    "HOST",
    "PORT",
];

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Significant digits kept in every result (`DECIMAL_PRECISION`)
    pub decimal_precision: u32,

    /// Rounding mode name such as `ROUND_HALF_EVEN` (`DECIMAL_ROUNDING`)
    pub decimal_rounding: String,

    /// `DEBUG`, `INFO`, `WARNING`, `ERROR` or `CRITICAL` (`LOG_LEVEL`)
    pub log_level: String,

    /// Optional file that receives a copy of the log (`LOG_FILE`)
    pub log_file: Option<PathBuf>,

    /// Bind address (`HOST`)
    pub host: String,

    /// Bind port (`PORT`)
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            decimal_precision: DEFAULT_PRECISION,
            decimal_rounding: RoundingMode::HalfEven.name().to_string(),
            log_level: "INFO".to_string(),
            log_file: None,
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Settings {
    /// Defaults overridden by the process environment.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Env::raw().only(&ENV_KEYS))
    }

    /// Load settings from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::Load` when a variable has the wrong type and
    /// `ConfigError::Context` when precision or rounding is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Extract and validate settings from any figment.
    ///
    /// # Errors
    /// See [`Settings::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract().map_err(Box::new)?;
        settings.decimal_context()?;
        Ok(settings)
    }

    /// Precision and rounding as a validated context.
    ///
    /// # Errors
    /// Returns `ConfigError::Context` for a zero precision or an
    /// unknown rounding name.
    pub fn decimal_context(&self) -> Result<DecimalContext, ConfigError> {
        let rounding: RoundingMode = self.decimal_rounding.parse()?;
        Ok(DecimalContext::new(self.decimal_precision, rounding)?)
    }

    /// `tracing` filter directive equivalent to `log_level`.
    ///
    /// Unknown names fall back to `info`.
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" | "FATAL" => "error",
            "OFF" => "off",
            _ => "info",
        }
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid decimal configuration: {0}")]
    Context(#[from] ContextError),
}
