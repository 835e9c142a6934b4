use serde_json::Value;
use thiserror::Error;

/// Failure to read or emit an amount-bearing wire field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed amount: {0}")]
    MalformedAmount(String),

    #[error("Unexpected JSON shape: expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl DecodeError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        DecodeError::MalformedAmount(msg.into())
    }

    pub(crate) fn shape(expected: &'static str, node: &Value) -> Self {
        DecodeError::UnexpectedShape {
            expected,
            found: node_kind(node),
        }
    }
}

/// Business-rule violations caught when two assets are paired.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPair {
    #[error("Invalid pair: both sides are XRP")]
    BothXrp,

    #[error("Invalid pair: both sides are the same asset")]
    IdenticalAssets,
}

pub(crate) fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
