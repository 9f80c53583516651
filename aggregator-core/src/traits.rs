//! Collaborator traits: the contracts the core calls, implemented by the
//! storage and external-services crates and by mocks in tests.

use async_trait::async_trait;
use url::Url;
use uuid::Uuid;

use crate::error::{FetchError, PublishError, StoreError};
use crate::types::{Article, ArticleField, FetchedArticle};

/// Durable CRUD plus substring search over articles.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Persists the article and returns its id.
    async fn add(&self, article: &Article) -> Result<Uuid, StoreError>;

    /// `Ok(None)` when no article has the given id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Article>, StoreError>;

    /// Sets one field to a new value. `Ok(false)` when the article is gone.
    async fn update_field(
        &self,
        id: Uuid,
        field: ArticleField,
        value: &str,
    ) -> Result<bool, StoreError>;

    /// Deletes the article. `Ok(false)` when it was already gone.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Title search, most recent first. The query is whitespace-tokenized and
    /// every token must match as a case-insensitive substring.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Article>, StoreError>;
}

/// Fetches and parses article content from a source URL.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedArticle, FetchError>;
}

/// Publishes content too large to send inline and returns its public URL.
#[async_trait]
pub trait LongformPublisher: Send + Sync {
    async fn publish(&self, title: &str, body: &str) -> Result<Url, PublishError>;
}
