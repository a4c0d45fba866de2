//! Unified error types for the domain layer
//!
//! Provides a common error type for draft validation and merging so callers
//! never have to fall back to String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Value is outside its allowed range
    #[error("{field} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    /// Parse error (for value objects and wire ordinals)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Draft data could not be merged or re-read after a patch
    #[error("Draft data error: {0}")]
    DraftData(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// Use this when client-side invariants are violated:
    /// - Required fields are empty or missing
    /// - Stat values are not on the internal 10-point grid
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("First name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an out-of-range error
    pub fn out_of_range(field: &'static str, value: i32, min: i32, max: i32) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// Creates a parse error for string or ordinal conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a draft data error
    pub fn draft_data(msg: impl Into<String>) -> Self {
        Self::DraftData(msg.into())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::DraftData(err.to_string())
    }
}
