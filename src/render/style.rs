//! Per-country fill and border styling.
//!
//! Styles serialize with Leaflet's path option names (`fillColor`,
//! `dashArray`, ...) so the browser page can hand them to `setStyle` as-is.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FILL_OPACITY: f64 = 0.7;
pub const BORDER_WEIGHT: u32 = 1;
pub const BORDER_COLOR: &str = "white";
pub const HIGHLIGHT_BORDER_COLOR: &str = "#666";

/// Highest red channel value a fill can take.
pub const MAX_RED: u8 = 254;

/// How a country's fill color is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Red intensity proportional to the country's article count.
    #[default]
    Scale,
    /// A fresh random red on every render, regardless of coverage.
    Random,
}

/// An `rgb(r,g,b)` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn red(r: u8) -> Self {
        Self { r, g: 0, b: 0 }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Leaflet path style for one country polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub weight: u32,
    pub opacity: f64,
    pub color: String,
    pub dash_array: String,
    pub fill_opacity: f64,
    pub fill_color: String,
}

impl FeatureStyle {
    /// The resting style of a country with the given fill.
    pub fn base(fill: Rgb) -> Self {
        Self {
            weight: BORDER_WEIGHT,
            opacity: 1.0,
            color: BORDER_COLOR.to_string(),
            dash_array: String::new(),
            fill_opacity: FILL_OPACITY,
            fill_color: fill.to_string(),
        }
    }

    /// This style with the hover border applied. The fill is kept.
    pub fn highlighted(&self) -> Self {
        Self {
            weight: BORDER_WEIGHT,
            color: HIGHLIGHT_BORDER_COLOR.to_string(),
            dash_array: String::new(),
            fill_opacity: FILL_OPACITY,
            ..self.clone()
        }
    }
}

/// Pick the fill for a country with `count` articles when the busiest country has `max_count`.
pub fn fill_color<R: Rng>(mode: FillMode, count: u64, max_count: u64, rng: &mut R) -> Rgb {
    match mode {
        FillMode::Scale => Rgb::red(scaled_red(count, max_count)),
        FillMode::Random => Rgb::red(rng.random_range(0..=MAX_RED)),
    }
}

fn scaled_red(count: u64, max_count: u64) -> u8 {
    if max_count == 0 || count == 0 {
        return 0;
    }
    let ratio = count.min(max_count) as f64 / max_count as f64;
    // Covered countries never fall back to the uncovered fill.
    ((ratio * f64::from(MAX_RED)).round() as u8).max(1)
}
