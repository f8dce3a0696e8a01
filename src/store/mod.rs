//! Access to the persisted article collection.
//!
//! The crawler writes articles into the store; this crate only reads them.
//! Two queries are needed, both expressed by [`ArticleStore`]:
//!
//! - [`ArticleStore::find_all`]: every record, in insertion order
//! - [`ArticleStore::find_one`]: the first record's title and description
//!
//! [`SqlStore`] is the production implementation. It owns a connection pool
//! that is opened once at startup, shared by all handlers, and closed on
//! shutdown.

pub mod sql;

#[cfg(test)]
pub mod memory;

pub use sql::SqlStore;

use crate::error::StoreError;
use crate::models::{Article, SampleArticle};
use std::future::Future;

/// Read access to the article collection.
pub trait ArticleStore: Send + Sync + 'static {
    /// Fetch every article as a plain record.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Article>, StoreError>> + Send;

    /// Fetch one arbitrary article's title and description, or `None` when
    /// the collection is empty.
    fn find_one(&self) -> impl Future<Output = Result<Option<SampleArticle>, StoreError>> + Send;
}
