//! HTTP surface: shared state and the axum router.

pub mod handlers;
pub mod page;

use crate::render::MapStage;
use crate::store::ArticleStore;
use axum::Router;
use axum::http::Method;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared by every handler.
///
/// `map` is `None` when the boundary geometry failed to load at startup.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub map: Option<Arc<MapStage>>,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, map: Option<Arc<MapStage>>) -> Self {
        Self { store, map }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            map: self.map.clone(),
        }
    }
}

/// Build the application router.
pub fn router<S: ArticleStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/api/data", get(handlers::all_articles::<S>))
        .route("/api/test", get(handlers::sample_article::<S>))
        .route("/api/locations", get(handlers::locations::<S>))
        .route("/api/map", get(handlers::map_view::<S>))
        .route("/countries_geo.json", get(handlers::boundary_geometry::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET]),
        )
        .with_state(state)
}
