//! Data models for crawled articles and their per-location aggregates.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A crawled article record as stored by the crawler
//! - [`SampleArticle`]: The title/description projection served by `/api/test`
//! - [`ArticleSummary`]: The display copy of an article kept inside a bucket
//! - [`LocationBucket`]: Per-location article count and summaries
//!
//! Records are passed through verbatim. Location names are not normalised, so
//! a bucket only lines up with a map feature when the crawler wrote the exact
//! `name` used by the boundary dataset.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A crawled news article as persisted in the article store.
///
/// Only `title`, `description` and `locations` are used by the map. The other
/// fields are store-internal and are served unfiltered by `/api/data`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// Store-assigned row identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The URL the crawler fetched the article from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The article title/headline.
    pub title: String,
    /// The meta description extracted by the crawler.
    pub description: String,
    /// Raw news keywords, as found in the page metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Publication date as written by the crawler. Not parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Country names the crawler tagged the article with, in tag order.
    #[serde(default)]
    pub locations: Vec<String>,
}

impl Article {
    /// Copy out the fields a bucket needs for display.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            title: self.title.clone(),
            description: self.description.clone(),
            locations: self.locations.clone(),
        }
    }
}

/// The `{title, description}` pair returned by the read-one query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SampleArticle {
    pub title: String,
    pub description: String,
}

/// Shallow display copy of an [`Article`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleSummary {
    pub title: String,
    pub description: String,
    pub locations: Vec<String>,
}

/// Aggregated coverage for one location name.
///
/// `count` always equals `articles.len()`: both grow together, once per
/// occurrence of the location in an article's `locations` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocationBucket {
    /// Number of location occurrences seen so far.
    pub count: u64,
    /// One summary per occurrence, in processing order.
    pub articles: Vec<ArticleSummary>,
}

impl LocationBucket {
    /// The article shown in a country's popup.
    pub fn sample(&self) -> Option<&ArticleSummary> {
        self.articles.first()
    }
}

/// Buckets keyed by exact location name.
pub type LocationBuckets = BTreeMap<String, LocationBucket>;
