//! SQLite-backed article store.
//!
//! # Table layout
//!
//! ```sql
//! CREATE TABLE articles (
//!     id          INTEGER PRIMARY KEY,
//!     url         TEXT,
//!     title       TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     keywords    TEXT,
//!     date        TEXT,
//!     locations   TEXT NOT NULL  -- JSON array of country names
//! )
//! ```

use super::ArticleStore;
use crate::error::StoreError;
use crate::models::{Article, SampleArticle};
use futures::{TryStreamExt, future};
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::str::FromStr;
use tracing::{debug, info, instrument};

const MAX_CONNECTIONS: u32 = 5;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS articles (
    id          INTEGER PRIMARY KEY,
    url         TEXT,
    title       TEXT NOT NULL,
    description TEXT NOT NULL,
    keywords    TEXT,
    date        TEXT,
    locations   TEXT NOT NULL DEFAULT '[]'
)";

const SELECT_ALL: &str =
    "SELECT id, url, title, description, keywords, date, locations FROM articles ORDER BY id";

const SELECT_ONE: &str = "SELECT title, description FROM articles ORDER BY id LIMIT 1";

/// Article store over a long-lived SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    /// Open the pool and make sure the `articles` table exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] if the connection string is invalid or the
    /// database cannot be opened.
    #[instrument(level = "info", skip_all)]
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = Self::from_pool(pool);
        store.ensure_schema().await?;
        info!(max_connections = MAX_CONNECTIONS, "Article store connected");
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `articles` table if it is missing, so an empty database
    /// reads as an empty collection.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection. Later queries fail with
    /// [`StoreError::Unavailable`].
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Article store closed");
    }
}

fn article_from_row(row: &SqliteRow) -> Result<Article, StoreError> {
    let raw_locations: String = row.try_get("locations")?;
    let locations = serde_json::from_str::<Vec<String>>(&raw_locations).map_err(|e| {
        StoreError::Query(format!("locations is not a JSON array of strings: {e}"))
    })?;

    Ok(Article {
        id: row.try_get("id")?,
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        keywords: row.try_get("keywords")?,
        date: row.try_get("date")?,
        locations,
    })
}

impl ArticleStore for SqlStore {
    #[instrument(level = "debug", skip_all)]
    async fn find_all(&self) -> Result<Vec<Article>, StoreError> {
        let articles: Vec<Article> = sqlx::query(SELECT_ALL)
            .fetch(&self.pool)
            .map_err(StoreError::from)
            .and_then(|row| future::ready(article_from_row(&row)))
            .try_collect()
            .await?;
        debug!(count = articles.len(), "Fetched all articles");
        Ok(articles)
    }

    #[instrument(level = "debug", skip_all)]
    async fn find_one(&self) -> Result<Option<SampleArticle>, StoreError> {
        let row = sqlx::query(SELECT_ONE).fetch_optional(&self.pool).await?;
        row.map(|row| {
            Ok(SampleArticle {
                title: row.try_get("title")?,
                description: row.try_get("description")?,
            })
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqlStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqlStore::from_pool(pool);
        store.ensure_schema().await.unwrap();
        store
    }

    async fn insert(store: &SqlStore, title: &str, description: &str, locations: &str) {
        sqlx::query(
            "INSERT INTO articles (url, title, description, date, locations) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(format!("https://example.com/{title}"))
        .bind(title)
        .bind(description)
        .bind("2018-01-07 18:36:49")
        .bind(locations)
        .execute(&store.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_find_all_in_insertion_order() {
        let store = memory_store().await;
        insert(&store, "A", "d", r#"["Laos"]"#).await;
        insert(&store, "B", "d2", r#"["Laos","Thailand"]"#).await;

        let articles = store.find_all().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[0].id, Some(1));
        assert_eq!(articles[0].url.as_deref(), Some("https://example.com/A"));
        assert_eq!(articles[0].keywords, None);
        assert_eq!(articles[1].locations, vec!["Laos", "Thailand"]);
    }

    #[tokio::test]
    async fn test_find_all_empty() {
        let store = memory_store().await;
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_one() {
        let store = memory_store().await;
        assert_eq!(store.find_one().await.unwrap(), None);

        insert(&store, "First", "one", "[]").await;
        insert(&store, "Second", "two", "[]").await;
        let sample = store.find_one().await.unwrap().unwrap();
        assert_eq!(
            sample,
            SampleArticle {
                title: "First".to_string(),
                description: "one".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_bad_locations_column_is_query_error() {
        let store = memory_store().await;
        insert(&store, "A", "d", "Laos").await;

        let err = store.find_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn test_missing_table_is_query_error() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqlStore::from_pool(pool);

        assert!(matches!(store.find_all().await, Err(StoreError::Query(_))));
        assert!(matches!(store.find_one().await, Err(StoreError::Query(_))));
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = memory_store().await;
        store.close().await;

        assert!(matches!(
            store.find_all().await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("articles.db").display());

        let store = SqlStore::connect(&url).await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
        store.close().await;
    }

    #[tokio::test]
    async fn test_connect_rejects_unusable_path() {
        let err = SqlStore::connect("sqlite:///nonexistent/dir/articles.db")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
