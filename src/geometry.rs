//! Country boundary geometry.
//!
//! The boundary dataset is a GeoJSON FeatureCollection with one feature per
//! country and the country's display name in `properties.name`. It is fetched
//! once at startup from either a local file or an `http(s)` URL and kept
//! read-only for the life of the process.

use crate::error::FetchFailure;
use axum::body::Bytes;
use serde_json::Value;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

/// Where the boundary dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundarySource {
    Remote(Url),
    File(PathBuf),
}

impl BoundarySource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => BoundarySource::Remote(url),
            _ => BoundarySource::File(PathBuf::from(raw)),
        }
    }
}

impl std::fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundarySource::Remote(url) => write!(f, "{url}"),
            BoundarySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A parsed FeatureCollection together with the bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct BoundaryGeometry {
    raw: Bytes,
    features: Vec<Value>,
}

impl BoundaryGeometry {
    /// Parse and check a FeatureCollection.
    ///
    /// # Errors
    ///
    /// [`FetchFailure::Malformed`] if the bytes are not JSON, the top-level
    /// `type` is not `FeatureCollection`, or `features` is not an array.
    pub fn from_bytes(raw: Bytes) -> Result<Self, FetchFailure> {
        let mut doc: Value =
            serde_json::from_slice(&raw).map_err(|e| FetchFailure::Malformed(e.to_string()))?;

        match doc.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => {}
            other => {
                return Err(FetchFailure::Malformed(format!("top-level type is {other:?}")));
            }
        }

        let features = match doc.get_mut("features").map(Value::take) {
            Some(Value::Array(features)) => features,
            _ => return Err(FetchFailure::Malformed("`features` is not an array".to_string())),
        };

        Ok(Self { raw, features })
    }

    /// The dataset exactly as it was fetched.
    pub fn raw(&self) -> Bytes {
        self.raw.clone()
    }

    pub fn features(&self) -> &[Value] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Country name of a feature, if it has one.
pub fn feature_name(feature: &Value) -> Option<&str> {
    feature.get("properties")?.get("name")?.as_str()
}

/// Fetch the boundary dataset once.
///
/// # Errors
///
/// [`FetchFailure::Status`] on a non-2xx response, [`FetchFailure::Transport`]
/// when the request fails, [`FetchFailure::Io`] when the file cannot be read,
/// and [`FetchFailure::Malformed`] when the body is not a FeatureCollection.
#[instrument(level = "info", skip_all, fields(source = %source))]
pub async fn fetch(
    source: &BoundarySource,
    http: &reqwest::Client,
) -> Result<BoundaryGeometry, FetchFailure> {
    let raw = match source {
        BoundarySource::Remote(url) => {
            let resp = http.get(url.clone()).send().await?;
            let status = resp.status();
            debug!(%status, "Boundary response received");
            if !status.is_success() {
                return Err(FetchFailure::Status(status.as_u16()));
            }
            resp.bytes().await?
        }
        BoundarySource::File(path) => Bytes::from(fs::read(path).await?),
    };

    let geometry = BoundaryGeometry::from_bytes(raw)?;
    info!(
        features = geometry.len(),
        bytes = geometry.raw().len(),
        "Loaded boundary geometry"
    );
    Ok(geometry)
}
