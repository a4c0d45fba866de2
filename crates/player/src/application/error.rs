//! Service layer error types
//!
//! Errors that can occur in the application service layer, abstracting over
//! transport failures and client-side domain validation.

use chargen_domain::{DomainError, Stage};
use thiserror::Error;

use crate::ports::outbound::ApiError;

/// Message shown for any failed request, whatever its cause.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Prompt shown when pending edits could not be saved before navigating.
pub const SAVE_FAILED_PROMPT: &str = "Failed to save. Discard changes and continue?";

/// Errors that can occur in service operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// HTTP request failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Client-side validation or draft merge failed
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Account has no draft yet
    #[error("No draft loaded")]
    NoDraft,

    /// Navigation was cancelled because pending edits could not be saved
    #[error("Navigation to {0} blocked by unsaved changes")]
    NavigationBlocked(Stage),

    /// The draft is locked by its application status
    #[error("Draft is locked while the application is {0}")]
    DraftLocked(String),
}

impl ServiceError {
    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Api(err) if err.is_not_found())
    }

    /// Check if this is an authorization error
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ServiceError::Api(ApiError::HttpError { status: 401 | 403, .. })
        )
    }

    /// Text shown to the player. Status codes are not differentiated.
    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }
}
