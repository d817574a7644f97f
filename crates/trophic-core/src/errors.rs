//! Structured error types shared across the trophic crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ModelError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (identifiers, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the trophic model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ModelError {
    /// Dependency graph structural errors.
    #[error("network error: {0}")]
    Network(ErrorInfo),
    /// Invalid configuration or parameter values.
    #[error("params error: {0}")]
    Params(ErrorInfo),
    /// Grid shape and indexing errors.
    #[error("grid error: {0}")]
    Grid(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ModelError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ModelError::Network(info) | ModelError::Params(info) | ModelError::Grid(info) => info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_roundtrips_through_json() {
        let err = ModelError::Network(
            ErrorInfo::new("matrix-shape", "dependency matrix is not square")
                .with_context("rows", "3")
                .with_context("cols", "2"),
        );
        let json = serde_json::to_string(&err).unwrap();
        let back: ModelError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
        assert_eq!(back.info().code, "matrix-shape");
    }

    #[test]
    fn display_includes_context_and_hint() {
        let info = ErrorInfo::new("weight-range", "weight outside [0, 1]")
            .with_context("entry", "(1, 0)")
            .with_hint("clamp the dependency matrix before construction");
        let rendered = format!("{info}");
        assert!(rendered.contains("weight-range"));
        assert!(rendered.contains("entry=(1, 0)"));
        assert!(rendered.contains("hint:"));
    }
}
