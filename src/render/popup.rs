//! Popup content bound to a country feature.

use crate::models::{ArticleSummary, LocationBucket};
use serde::Serialize;

/// What the popup for one country shows: its name, how many articles
/// mention it, and one of those articles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub location: String,
    pub count: u64,
    pub sample: Option<ArticleSummary>,
}

impl Popup {
    pub fn for_location(location: &str, bucket: Option<&LocationBucket>) -> Self {
        Self {
            location: location.to_string(),
            count: bucket.map_or(0, |b| b.count),
            sample: bucket.and_then(LocationBucket::sample).cloned(),
        }
    }

    /// One-line plain text rendering, used for logs and text clients.
    pub fn headline(&self) -> String {
        match &self.sample {
            Some(article) => format!(
                "{} ({} article{}): {}",
                self.location,
                self.count,
                if self.count == 1 { "" } else { "s" },
                article.title
            ),
            None => format!("{}: No articles", self.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_with_bucket() {
        let bucket = LocationBucket {
            count: 3,
            articles: vec![ArticleSummary {
                title: "Monsoon season".to_string(),
                description: "Rains arrive early".to_string(),
                locations: vec!["Laos".to_string()],
            }],
        };

        let popup = Popup::for_location("Laos", Some(&bucket));
        assert_eq!(popup.count, 3);
        assert_eq!(popup.sample.as_ref().unwrap().title, "Monsoon season");
        assert_eq!(popup.headline(), "Laos (3 articles): Monsoon season");
    }

    #[test]
    fn test_popup_without_bucket() {
        let popup = Popup::for_location("Chad", None);
        assert_eq!(popup.count, 0);
        assert!(popup.sample.is_none());
        assert_eq!(popup.headline(), "Chad: No articles");
    }
}
