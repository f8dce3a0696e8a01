//! The map render stage.
//!
//! A [`MapStage`] is mounted once the boundary geometry has loaded. For each
//! request it combines that geometry with a fresh set of location buckets and
//! produces a [`MapView`]: the viewport, the tile layer, and a styled
//! FeatureCollection in which every country carries its fill style, hover
//! style, article count and popup.
//!
//! # Submodules
//!
//! - [`style`]: fill color selection and Leaflet path styles
//! - [`interaction`]: the Normal/Highlighted hover state machine
//! - [`popup`]: per-country popup content

pub mod interaction;
pub mod popup;
pub mod style;

pub use interaction::{FeatureInteraction, FeatureState};
pub use popup::Popup;
pub use style::{FeatureStyle, FillMode, Rgb};

use crate::aggregate::{max_count, ranked};
use crate::config::MapSettings;
use crate::geometry::{BoundaryGeometry, feature_name};
use crate::models::LocationBuckets;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of entries in the legend.
pub const LEGEND_SIZE: usize = 10;

/// Everything the render stage owns for one render pass.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub map_center: [f64; 2],
    pub zoom_level: f64,
    pub zoom_granularity: f64,
    pub boundary_geometry: Arc<BoundaryGeometry>,
    pub location_buckets: LocationBuckets,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub center: [f64; 2],
    pub zoom: f64,
    pub zoom_snap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    pub url: String,
    pub max_zoom: u8,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// `[lat, lng]`
    pub position: [f64; 2],
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub location: String,
    pub count: u64,
    pub fill_color: String,
}

/// The rendered map, as served by `/api/map`.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub generated_at: DateTime<Utc>,
    pub fill_mode: FillMode,
    pub viewport: Viewport,
    pub tiles: TileLayer,
    pub countries: Value,
    pub marker: Option<Marker>,
    pub legend: Vec<LegendEntry>,
    /// Bucket names that match no feature's `name`; these never show on the map.
    pub unmatched_locations: Vec<String>,
}

/// The mounted render stage: settings plus immutable boundary geometry.
#[derive(Debug)]
pub struct MapStage {
    settings: MapSettings,
    geometry: Arc<BoundaryGeometry>,
}

impl MapStage {
    pub fn new(settings: MapSettings, geometry: Arc<BoundaryGeometry>) -> Self {
        Self { settings, geometry }
    }

    pub fn geometry(&self) -> &Arc<BoundaryGeometry> {
        &self.geometry
    }

    pub fn view_state(&self, buckets: LocationBuckets) -> ViewState {
        ViewState {
            map_center: self.settings.center,
            zoom_level: self.settings.zoom,
            zoom_granularity: self.settings.zoom_snap,
            boundary_geometry: Arc::clone(&self.geometry),
            location_buckets: buckets,
        }
    }

    /// Render with the thread-local RNG (only consulted in random fill mode).
    pub fn render(&self, buckets: LocationBuckets) -> MapView {
        self.render_with(buckets, &mut rand::rng())
    }

    #[instrument(level = "debug", skip_all, fields(locations = buckets.len()))]
    pub fn render_with<R: Rng>(&self, buckets: LocationBuckets, rng: &mut R) -> MapView {
        let state = self.view_state(buckets);
        let mode = self.settings.fill_mode;
        let max = max_count(&state.location_buckets);

        // One fill per matched location, shared by its features and its legend entry.
        let mut fills: HashMap<String, Rgb> = HashMap::new();
        let features: Vec<Value> = state
            .boundary_geometry
            .features()
            .iter()
            .map(|feature| {
                let name = feature_name(feature);
                let bucket = name.and_then(|name| state.location_buckets.get(name));
                let count = bucket.map_or(0, |b| b.count);
                let fill = match (name, bucket) {
                    (Some(name), Some(_)) => *fills
                        .entry(name.to_string())
                        .or_insert_with(|| style::fill_color(mode, count, max, rng)),
                    _ => style::fill_color(mode, count, max, rng),
                };
                let interaction = FeatureInteraction::new(FeatureStyle::base(fill));
                decorate(
                    feature,
                    count,
                    &interaction,
                    &Popup::for_location(name.unwrap_or_default(), bucket),
                )
            })
            .collect();

        let unmatched_locations: Vec<String> = state
            .location_buckets
            .keys()
            .filter(|name| !fills.contains_key(*name))
            .cloned()
            .collect();
        if !unmatched_locations.is_empty() {
            debug!(
                count = unmatched_locations.len(),
                locations = ?unmatched_locations,
                "Locations with articles have no matching boundary feature"
            );
        }

        let legend = ranked(&state.location_buckets)
            .into_iter()
            .take(LEGEND_SIZE)
            .map(|(location, count)| {
                let fill = match fills.get(location) {
                    Some(fill) => *fill,
                    None => style::fill_color(mode, count, max, rng),
                };
                LegendEntry {
                    location: location.to_string(),
                    count,
                    fill_color: fill.to_string(),
                }
            })
            .collect();

        let marker = self.settings.featured_location.as_deref().map(|location| Marker {
            position: state.map_center,
            popup: Popup::for_location(location, state.location_buckets.get(location)),
        });

        debug!(features = features.len(), max_count = max, "Rendered map view");
        MapView {
            generated_at: Utc::now(),
            fill_mode: mode,
            viewport: Viewport {
                center: state.map_center,
                zoom: state.zoom_level,
                zoom_snap: state.zoom_granularity,
            },
            tiles: TileLayer {
                url: self.settings.tile_url.clone(),
                max_zoom: self.settings.max_zoom,
                attribution: self.settings.attribution.clone(),
            },
            countries: json!({
                "type": "FeatureCollection",
                "features": features,
            }),
            marker,
            legend,
            unmatched_locations,
        }
    }
}

/// Copy a feature and attach its render output to `properties`.
fn decorate(
    feature: &Value,
    count: u64,
    interaction: &FeatureInteraction,
    popup: &Popup,
) -> Value {
    let mut feature = feature.clone();
    if let Some(obj) = feature.as_object_mut() {
        let props = obj.entry("properties").or_insert_with(|| json!({}));
        if !props.is_object() {
            *props = json!({});
        }
        props["count"] = json!(count);
        props["style"] = json!(interaction.style_for(FeatureState::Normal));
        props["highlight_style"] = json!(interaction.style_for(FeatureState::Highlighted));
        props["popup"] = json!(popup);
    }
    feature
}
