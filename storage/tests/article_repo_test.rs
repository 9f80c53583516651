//! Integration tests for [`storage::ArticleRepository`].
//!
//! Covers CRUD, per-field updates, and AND-semantics title search using an
//! in-memory SQLite database.

use chrono::{Duration, Utc};
use url::Url;
use uuid::Uuid;

use aggregator_core::{Article, ArticleField, ArticleStore};
use storage::ArticleRepository;

async fn new_repo() -> ArticleRepository {
    ArticleRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository")
}

fn article(title: &str) -> Article {
    Article {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: "body".to_string(),
        source_url: Url::parse("https://example.com/a").unwrap(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn add_then_get_by_id() {
    let repo = new_repo().await;
    let a = article("Byzantine trade routes");

    repo.add(&a).await.expect("Failed to save article");

    let got = repo
        .get_by_id(a.id)
        .await
        .expect("Failed to get article")
        .expect("Article should exist");
    assert_eq!(got.id, a.id);
    assert_eq!(got.title, "Byzantine trade routes");
    assert_eq!(got.content, "body");
    assert_eq!(got.source_url, a.source_url);
}

#[tokio::test]
async fn get_by_id_missing_returns_none() {
    let repo = new_repo().await;
    let got = repo.get_by_id(Uuid::new_v4()).await.expect("Failed to query");
    assert!(got.is_none());
}

#[tokio::test]
async fn update_field_changes_only_that_field() {
    let repo = new_repo().await;
    let a = article("Old title");
    repo.add(&a).await.unwrap();

    let found = repo
        .update_field(a.id, ArticleField::Title, "New title")
        .await
        .expect("Failed to update");
    assert!(found);

    let got = repo.get_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(got.title, "New title");
    assert_eq!(got.content, "body");

    let found = repo
        .update_field(a.id, ArticleField::Content, "New body")
        .await
        .unwrap();
    assert!(found);
    let got = repo.get_by_id(a.id).await.unwrap().unwrap();
    assert_eq!(got.content, "New body");
    assert_eq!(got.title, "New title");
}

#[tokio::test]
async fn update_field_missing_article_reports_not_found() {
    let repo = new_repo().await;
    let found = repo
        .update_field(Uuid::new_v4(), ArticleField::Title, "whatever")
        .await
        .expect("Update should not error");
    assert!(!found);
}

#[tokio::test]
async fn remove_reports_found_then_gone() {
    let repo = new_repo().await;
    let a = article("Doomed");
    repo.add(&a).await.unwrap();

    assert!(repo.remove(a.id).await.unwrap());
    assert!(!repo.remove(a.id).await.unwrap());
    assert!(repo.get_by_id(a.id).await.unwrap().is_none());
}

#[tokio::test]
async fn search_requires_all_tokens_case_insensitive() {
    let repo = new_repo().await;
    repo.add(&article("Async patterns in Rust")).await.unwrap();
    repo.add(&article("Rust for beginners")).await.unwrap();
    repo.add(&article("Async cooking")).await.unwrap();

    let results = repo.search_by_title("rust ASYNC").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Async patterns in Rust");

    let results = repo.search_by_title("rust").await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn search_orders_most_recent_first() {
    let repo = new_repo().await;

    let mut older = article("History part one");
    older.created_at = Utc::now() - Duration::hours(2);
    let mut newer = article("History part two");
    newer.created_at = Utc::now();

    repo.add(&older).await.unwrap();
    repo.add(&newer).await.unwrap();

    let results = repo.search_by_title("history").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "History part two");
    assert_eq!(results[1].title, "History part one");
}

#[tokio::test]
async fn search_empty_query_returns_nothing() {
    let repo = new_repo().await;
    repo.add(&article("Anything")).await.unwrap();

    let results = repo.search_by_title("   ").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn file_backed_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}/articles.db", dir.path().display());

    let a = article("Persistent");
    {
        let repo = ArticleRepository::new(&url)
            .await
            .expect("Failed to create repository");
        repo.add(&a).await.unwrap();
    }

    let repo = ArticleRepository::new(&url)
        .await
        .expect("Failed to reopen repository");
    let got = repo.get_by_id(a.id).await.unwrap().expect("Article should survive reopen");
    assert_eq!(got.title, "Persistent");
}
