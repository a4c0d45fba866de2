//! Cached GET helpers shared by the services.

use serde::de::DeserializeOwned;
use serde_json::Value;

use chargen_domain::DraftId;
use chargen_shared::{routes, ListResponse};

use crate::application::api::Api;
use crate::application::error::ServiceError;
use crate::infrastructure::QueryCache;
use crate::ports::outbound::{ApiError, ApiPort};

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|e| ApiError::ParseError(e.to_string()).into())
}

/// GET `path`, serving a fresh cached copy when there is one.
pub async fn fetch_cached<T: DeserializeOwned>(
    api: &Api,
    cache: &QueryCache,
    path: &str,
) -> Result<T, ServiceError> {
    if let Some(value) = cache.get(path).await {
        match decode(value) {
            Ok(hit) => return Ok(hit),
            Err(err) => {
                tracing::warn!(path, error = %err, "Dropping undecodable cache entry");
                cache.invalidate(path).await;
            }
        }
    }

    let value: Value = api.get(path).await?;
    let decoded = decode(value.clone())?;
    cache.insert(path, value).await;
    Ok(decoded)
}

/// Like [`fetch_cached`], but a 404 yields `None` and is not cached.
pub async fn fetch_cached_optional<T: DeserializeOwned>(
    api: &Api,
    cache: &QueryCache,
    path: &str,
) -> Result<Option<T>, ServiceError> {
    if let Some(value) = cache.get(path).await {
        if let Ok(hit) = decode(value) {
            return Ok(Some(hit));
        }
        cache.invalidate(path).await;
    }

    match api.get_optional::<Value>(path).await? {
        None => Ok(None),
        Some(value) => {
            let decoded = decode(value.clone())?;
            cache.insert(path, value).await;
            Ok(Some(decoded))
        }
    }
}

/// Cached list endpoint, accepting plain or paginated bodies.
pub async fn fetch_cached_list<T: DeserializeOwned>(
    api: &Api,
    cache: &QueryCache,
    path: &str,
) -> Result<Vec<T>, ServiceError> {
    let list: ListResponse<T> = fetch_cached(api, cache, path).await?;
    Ok(list.into_items())
}

/// Drop every cached query scoped to `draft`, plus the account's draft list.
pub async fn invalidate_draft_queries(cache: &QueryCache, draft: DraftId) {
    let dropped = cache.invalidate_prefix(&routes::draft(draft)).await;
    cache.invalidate(&routes::drafts()).await;
    tracing::debug!(%draft, dropped, "Invalidated draft queries");
}
