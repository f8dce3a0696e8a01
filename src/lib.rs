//! Library half of News Map: everything except process startup.
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Read access to the crawled article collection |
//! | [`aggregate`] | Folds articles into per-location buckets |
//! | [`geometry`] | Country boundary GeoJSON and its loader |
//! | [`bootstrap`] | Fetches geometry once and mounts the render stage |
//! | [`render`] | Styles, hover state machine, popups, map view |
//! | [`http`] | axum router and handlers |
//! | [`cli`], [`config`], [`error`] | Flags, layered settings, error types |

pub mod aggregate;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod http;
pub mod models;
pub mod render;
pub mod store;
