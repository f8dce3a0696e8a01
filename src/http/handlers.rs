//! Route handlers.
//!
//! | Route | Handler | Success body |
//! |-------|---------|--------------|
//! | `GET /api/data` | [`all_articles`] | every article record |
//! | `GET /api/test` | [`sample_article`] | `{title, description}` |
//! | `GET /api/locations` | [`locations`] | location buckets |
//! | `GET /api/map` | [`map_view`] | rendered map view |
//! | `GET /countries_geo.json` | [`boundary_geometry`] | boundary GeoJSON as loaded |
//!
//! Store failures become 503 responses with a JSON error body, see
//! [`ApiError`].

use super::AppState;
use super::page::INDEX_HTML;
use crate::aggregate::aggregate;
use crate::error::ApiError;
use crate::models::{Article, LocationBuckets, SampleArticle};
use crate::render::MapView;
use crate::store::ArticleStore;
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, info, instrument};

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn healthz() -> &'static str {
    "ok"
}

#[instrument(level = "info", skip_all)]
pub async fn all_articles<S: ArticleStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.store.find_all().await?;
    info!(count = articles.len(), "Serving all articles");
    Ok(Json(articles))
}

#[instrument(level = "info", skip_all)]
pub async fn sample_article<S: ArticleStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<SampleArticle>, ApiError> {
    state
        .store
        .find_one()
        .await?
        .map(Json)
        .ok_or(ApiError::NoArticles)
}

#[instrument(level = "info", skip_all)]
pub async fn locations<S: ArticleStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<LocationBuckets>, ApiError> {
    let articles = state.store.find_all().await?;
    Ok(Json(aggregate(&articles)))
}

#[instrument(level = "info", skip_all)]
pub async fn map_view<S: ArticleStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<MapView>, ApiError> {
    let stage = state.map.clone().ok_or(ApiError::MapUnmounted)?;
    let articles = state.store.find_all().await?;
    let buckets = aggregate(&articles);
    let view = stage.render(buckets);
    if let Some(marker) = &view.marker {
        debug!(popup = %marker.popup.headline(), "Featured marker");
    }
    info!(
        articles = articles.len(),
        unmatched = view.unmatched_locations.len(),
        "Rendered map view"
    );
    Ok(Json(view))
}

pub async fn boundary_geometry<S: ArticleStore>(
    State(state): State<AppState<S>>,
) -> Result<Response, ApiError> {
    let stage = state.map.as_ref().ok_or(ApiError::MapUnmounted)?;
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        stage.geometry().raw(),
    )
        .into_response())
}
