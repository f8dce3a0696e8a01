//! Grouping of articles by the locations they mention.
//!
//! The whole fetch result is folded into a finished [`LocationBuckets`] map in
//! one pass, so callers only ever see a complete aggregate.
//!
//! # Counting rule
//!
//! Every occurrence counts. An article tagged `["Laos", "Laos"]` adds two to
//! the Laos bucket and two summaries to its list. Names are compared exactly,
//! with no case folding or alias handling.

use crate::models::{Article, LocationBuckets};
use itertools::Itertools;
use tracing::{debug, instrument};

/// Fold `articles` into per-location buckets.
///
/// # Example
///
/// ```ignore
/// let buckets = aggregate(&articles);
/// assert_eq!(buckets["Laos"].count, 2);
/// ```
#[instrument(level = "debug", skip_all, fields(articles = articles.len()))]
pub fn aggregate(articles: &[Article]) -> LocationBuckets {
    let buckets = articles
        .iter()
        .fold(LocationBuckets::new(), |mut buckets, article| {
            for location in &article.locations {
                let bucket = buckets.entry(location.clone()).or_default();
                bucket.count += 1;
                bucket.articles.push(article.summary());
            }
            buckets
        });
    debug!(locations = buckets.len(), "Aggregated articles by location");
    buckets
}

/// Largest bucket count, or 0 when there are no buckets.
pub fn max_count(buckets: &LocationBuckets) -> u64 {
    buckets.values().map(|b| b.count).max().unwrap_or(0)
}

/// `(location, count)` pairs, busiest first, ties broken by name.
pub fn ranked(buckets: &LocationBuckets) -> Vec<(&str, u64)> {
    buckets
        .iter()
        .map(|(name, bucket)| (name.as_str(), bucket.count))
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
        .collect()
}
