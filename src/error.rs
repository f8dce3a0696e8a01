//! Error types for the store, the geometry loader, configuration and the HTTP API.
//!
//! | Type | Raised by | Surfaced as |
//! |------|-----------|-------------|
//! | [`StoreError`] | [`crate::store`] | 503 JSON body |
//! | [`FetchFailure`] | [`crate::geometry`] | log line; map stays unmounted |
//! | [`ConfigError`] | [`crate::config`] | startup failure |
//! | [`ApiError`] | [`crate::http`] handlers | status + `{error, message}` |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tracing::error;

/// Failures talking to the article store.
#[derive(Debug)]
pub enum StoreError {
    /// The connection could not be established, or the pool was closed.
    Unavailable(String),
    /// A query ran but failed, or a row could not be decoded.
    Query(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "article store unavailable: {msg}"),
            StoreError::Query(msg) => write!(f, "article store query failed: {msg}"),
        }
    }
}

impl Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Failures fetching the boundary geometry at startup.
#[derive(Debug)]
pub enum FetchFailure {
    /// The server answered with a non-success status.
    Status(u16),
    /// The request never completed.
    Transport(String),
    /// The local file could not be read.
    Io(std::io::Error),
    /// The body is not a GeoJSON FeatureCollection.
    Malformed(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "unexpected status {code}"),
            FetchFailure::Transport(msg) => write!(f, "request failed: {msg}"),
            FetchFailure::Io(e) => write!(f, "read failed: {e}"),
            FetchFailure::Malformed(msg) => write!(f, "not a FeatureCollection: {msg}"),
        }
    }
}

impl Error for FetchFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchFailure::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchFailure {
    fn from(e: reqwest::Error) -> Self {
        FetchFailure::Transport(e.to_string())
    }
}

impl From<std::io::Error> for FetchFailure {
    fn from(e: std::io::Error) -> Self {
        FetchFailure::Io(e)
    }
}

/// Invalid or unreadable configuration.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: std::io::Error },
    Parse { path: String, source: serde_yaml::Error },
    Missing(&'static str),
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "cannot read {path}: {source}"),
            ConfigError::Parse { path, source } => write!(f, "cannot parse {path}: {source}"),
            ConfigError::Missing(key) => write!(f, "missing required setting `{key}`"),
            ConfigError::Invalid { key, reason } => write!(f, "invalid `{key}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    NoArticles,
    MapUnmounted,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NoArticles => StatusCode::NOT_FOUND,
            ApiError::MapUnmounted => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Store(StoreError::Unavailable(_)) => "store_unavailable",
            ApiError::Store(StoreError::Query(_)) => "store_query_failed",
            ApiError::NoArticles => "no_articles",
            ApiError::MapUnmounted => "map_unmounted",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Store(e) => write!(f, "{e}"),
            ApiError::NoArticles => write!(f, "the article collection is empty"),
            ApiError::MapUnmounted => write!(f, "boundary geometry failed to load"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let e = StoreError::Query("no such table: articles".to_string());
        assert_eq!(
            e.to_string(),
            "article store query failed: no such table: articles"
        );
    }

    #[test]
    fn test_pool_closed_maps_to_unavailable() {
        let e: StoreError = sqlx::Error::PoolClosed.into();
        assert!(matches!(e, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_query() {
        let e: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(e, StoreError::Query(_)));
    }

    #[test]
    fn test_api_error_statuses() {
        assert_eq!(
            ApiError::Store(StoreError::Unavailable("down".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::NoArticles.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::MapUnmounted.code(), "map_unmounted");
    }

    #[tokio::test]
    async fn test_query_failure_response() {
        let err = ApiError::Store(StoreError::Query("no such table: articles".into()));
        assert_eq!(err.code(), "store_query_failed");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "store_query_failed");
        assert!(body["message"].as_str().unwrap().contains("no such table"));
    }

    #[test]
    fn test_fetch_failure_display() {
        assert_eq!(FetchFailure::Status(404).to_string(), "unexpected status 404");
    }
}
