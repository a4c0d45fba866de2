//! Typed API port
//!
//! Services talk to the backend through [`ApiPort`]. Its methods are generic
//! over request and response types, so it is not object-safe; the object-safe
//! boundary is [`super::RawApiPort`].

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors crossing the HTTP boundary.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Request could not be sent or the connection dropped
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    SerializeError(String),

    /// Request path could not be joined onto the base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[async_trait::async_trait]
pub trait ApiPort: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError>;

    /// GET that maps 404 to `None`
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError>;

    async fn post<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>;

    async fn post_no_response<B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError>;

    async fn patch<T: DeserializeOwned, B: Serialize + Send + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
