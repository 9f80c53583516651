//! Article repository: persistence and title search for articles.
//!
//! Implements [`aggregator_core::ArticleStore`] over SQLite via sqlx. Field
//! updates go through an explicit per-field dispatch; there is no by-name
//! column lookup, so only the closed [`ArticleField`] set ever reaches SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::info;
use url::Url;
use uuid::Uuid;

use aggregator_core::{Article, ArticleField, ArticleStore, StoreError};

use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ArticleRepository {
    pool_manager: SqlitePoolManager,
}

/// Raw row; converted to [`Article`] after the URL and id are re-parsed.
#[derive(FromRow)]
struct ArticleRow {
    id: String,
    title: String,
    content: String,
    source_url: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = StoreError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let id: Uuid = row
            .id
            .parse()
            .map_err(|_| StoreError::Database(format!("Corrupt article id: {}", row.id)))?;
        let source_url: Url = row
            .source_url
            .parse()
            .map_err(|_| StoreError::Database(format!("Corrupt source url: {}", row.source_url)))?;
        Ok(Article {
            id,
            title: row.title,
            content: row.content,
            source_url,
            created_at: row.created_at,
        })
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

impl ArticleRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                source_url TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_articles_title ON articles(title)")
            .execute(pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_articles_created_at ON articles(created_at)")
            .execute(pool)
            .await?;

        Ok(())
    }

    fn column(field: ArticleField) -> &'static str {
        match field {
            ArticleField::Title => "title",
            ArticleField::Content => "content",
        }
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn add(&self, article: &Article) -> Result<Uuid, StoreError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO articles (id, title, content, source_url, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.id.to_string())
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.source_url.as_str())
        .bind(article.created_at)
        .execute(pool)
        .await
        .map_err(db_err)?;

        info!(article_id = %article.id, title = %article.title, "Saved article");
        Ok(article.id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Article>, StoreError> {
        let pool = self.pool_manager.pool();

        let row: Option<ArticleRow> = sqlx::query_as(
            "SELECT id, title, content, source_url, created_at FROM articles WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;

        row.map(Article::try_from).transpose()
    }

    async fn update_field(
        &self,
        id: Uuid,
        field: ArticleField,
        value: &str,
    ) -> Result<bool, StoreError> {
        let pool = self.pool_manager.pool();

        let sql = format!("UPDATE articles SET {} = ? WHERE id = ?", Self::column(field));
        let result = sqlx::query(&sql)
            .bind(value)
            .bind(id.to_string())
            .execute(pool)
            .await
            .map_err(db_err)?;

        info!(article_id = %id, field = %field, "Updated article field");
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id.to_string())
            .execute(pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Article>, StoreError> {
        let pool = self.pool_manager.pool();

        let tokens: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        // All tokens must match (AND), case-insensitive substring each.
        let mut sql =
            String::from("SELECT id, title, content, source_url, created_at FROM articles WHERE 1=1");
        for _ in &tokens {
            sql.push_str(" AND lower(title) LIKE ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query_builder = sqlx::query_as::<_, ArticleRow>(&sql);
        for token in &tokens {
            query_builder = query_builder.bind(format!("%{}%", token));
        }

        let rows = query_builder.fetch_all(pool).await.map_err(db_err)?;
        info!("Found {} articles matching '{}'", rows.len(), query);

        rows.into_iter().map(Article::try_from).collect()
    }
}
