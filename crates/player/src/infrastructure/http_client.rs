//! REST adapter for the character creation API

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::ports::outbound::{ApiError, RawApiPort};

/// HTTP client implementing [`RawApiPort`] with reqwest.
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiAdapter {
    /// Build the adapter; fails if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
            session_token: config.session_token.clone(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}{}", self.base_url, path);
        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "API request");
        let builder = self.client.request(method, url);
        Ok(match &self.session_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
        tracing::warn!(status = status.as_u16(), %message, "API request failed");
        Err(ApiError::http(status.as_u16(), message))
    }

    async fn read_json(response: Response) -> Result<Value, ApiError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        Self::read_json(response).await
    }

    async fn get_optional_json(&self, path: &str) -> Result<Option<Value>, ApiError> {
        match self.send(self.request(Method::GET, path)?).await {
            Ok(response) => Self::read_json(response).await.map(Some),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .send(self.request(Method::POST, path)?.json(body))
            .await?;
        Self::read_json(response).await
    }

    async fn post_no_response_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        self.send(self.request(Method::POST, path)?.json(body))
            .await?;
        Ok(())
    }

    async fn patch_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .send(self.request(Method::PATCH, path)?.json(body))
            .await?;
        Self::read_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn adapter(api_url: &str) -> ApiAdapter {
        ApiAdapter::new(&ClientConfig {
            api_url: Url::parse(api_url).unwrap(),
            session_token: None,
            request_timeout: Duration::from_secs(1),
            catalog_ttl: Duration::from_secs(1),
            draft_ttl: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn adapter_builds_with_configured_timeout() {
        let config = ClientConfig::from_lookup(|key| {
            (key == "CHARGEN_REQUEST_TIMEOUT_MS").then(|| "250".to_string())
        })
        .unwrap();
        let adapter = ApiAdapter::new(&config).unwrap();
        assert_eq!(adapter.base_url, "http://localhost:8000");
    }

    #[test]
    fn paths_join_onto_origin() {
        let url = adapter("http://localhost:8000/")
            .url("/api/character-creation/drafts/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/character-creation/drafts/"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let url = adapter("https://example.org/game")
            .url("/api/character-creation/areas/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/game/api/character-creation/areas/"
        );
    }
}
