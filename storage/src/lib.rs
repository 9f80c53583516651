//! Storage crate: SQLite persistence for articles.
//!
//! ## Modules
//!
//! - [`article_repo`] – ArticleRepository (implements `aggregator_core::ArticleStore`)
//! - [`sqlite_pool`] – SqlitePoolManager

mod article_repo;
mod sqlite_pool;

pub use article_repo::ArticleRepository;
pub use sqlite_pool::SqlitePoolManager;
