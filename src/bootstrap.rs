//! Startup loading of the boundary geometry and mounting of the render stage.
//!
//! The geometry is fetched exactly once. The render stage is only built in
//! the success path; on any failure the problem is logged and the server runs
//! without a map (the map endpoints answer 503). Nothing is retried.

use crate::config::MapSettings;
use crate::geometry::{self, BoundarySource};
use crate::render::MapStage;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Fetch the boundary geometry and mount a [`MapStage`] with it.
///
/// Returns `None` when the fetch fails. Errors never escape this function.
#[instrument(level = "info", skip_all, fields(source = %source))]
pub async fn mount(
    source: &BoundarySource,
    http: &reqwest::Client,
    settings: MapSettings,
) -> Option<Arc<MapStage>> {
    match geometry::fetch(source, http).await {
        Ok(geometry) => {
            info!(features = geometry.len(), "Mounted map render stage");
            Some(Arc::new(MapStage::new(settings, Arc::new(geometry))))
        }
        Err(e) => {
            error!(error = %e, "Problem fetching country boundaries; map will not be mounted");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::tests::TWO_COUNTRIES;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::net::SocketAddr;

    fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_non_success_status_leaves_map_unmounted() {
        let addr = serve(Router::new().route(
            "/countries_geo.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;
        let source = BoundarySource::parse(&format!("http://{addr}/countries_geo.json"));

        let stage = mount(&source, &client(), MapSettings::default()).await;
        assert!(stage.is_none());
    }

    #[tokio::test]
    async fn test_not_found_leaves_map_unmounted() {
        let addr = serve(Router::new()).await;
        let source = BoundarySource::parse(&format!("http://{addr}/countries_geo.json"));

        let stage = mount(&source, &client(), MapSettings::default()).await;
        assert!(stage.is_none());
    }

    #[tokio::test]
    async fn test_success_mounts_stage() {
        let addr = serve(Router::new().route(
            "/countries_geo.json",
            get(|| async { TWO_COUNTRIES }),
        ))
        .await;
        let source = BoundarySource::parse(&format!("http://{addr}/countries_geo.json"));

        let stage = mount(&source, &client(), MapSettings::default())
            .await
            .unwrap();
        assert_eq!(stage.geometry().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_host_leaves_map_unmounted() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = BoundarySource::parse(&format!("http://{addr}/countries_geo.json"));

        let stage = mount(&source, &client(), MapSettings::default()).await;
        assert!(stage.is_none());
    }
}
