use super::ArticleStore;
use crate::error::StoreError;
use crate::models::{Article, SampleArticle};
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory article store for handler tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub articles: Vec<Article>,
    pub unavailable: bool,
    pub find_all_calls: AtomicU64,
}

impl MemoryStore {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

impl ArticleStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> {
        self.find_all_calls.fetch_add(1, Ordering::Relaxed);
        self.check()?;
        Ok(self.articles.clone())
    }

    async fn find_one(&self) -> Result<Option<SampleArticle>, StoreError> {
        self.check()?;
        Ok(self.articles.first().map(|a| SampleArticle {
            title: a.title.clone(),
            description: a.description.clone(),
        }))
    }
}
