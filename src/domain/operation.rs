// ============================================================================
// Operation Domain Model
// ============================================================================

use crate::numeric::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One of the four supported arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Accepted spellings, already trimmed and lowercased.
const ALIASES: [(&str, Operation); 12] = [
    ("add", Operation::Add),
    ("+", Operation::Add),
    ("plus", Operation::Add),
    ("subtract", Operation::Subtract),
    ("-", Operation::Subtract),
    ("minus", Operation::Subtract),
    ("multiply", Operation::Multiply),
    ("*", Operation::Multiply),
    ("x", Operation::Multiply),
    ("times", Operation::Multiply),
    ("divide", Operation::Divide),
    ("/", Operation::Divide),
];

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Canonical lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Resolve a JSON operation token to its canonical operation.
    ///
    /// Strings are trimmed and lowercased before lookup. Any other JSON value
    /// is rendered to text first, so it never matches an alias.
    ///
    /// # Errors
    /// Returns `UnsupportedOperation` for null or unrecognised tokens.
    pub fn resolve(token: &Value) -> CoreResult<Self> {
        match token {
            Value::Null => Err(CoreError::unsupported_operation("Operation is required")),
            Value::String(text) => text.parse(),
            other => other.to_string().parse(),
        }
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, op)| *op)
            .ok_or_else(|| {
                CoreError::unsupported_operation(format!(
                    "Unsupported operation: '{s}'. Supported operations: add, subtract, multiply, divide"
                ))
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
