//! # aggregator-core
//!
//! Core types and traits for the articles aggregator bot: domain model
//! ([`Article`], [`ArticleField`]), inbound event model ([`InboundEvent`]),
//! button payload codec ([`ButtonPayload`]), collaborator traits
//! ([`ArticleStore`], [`ArticleFetcher`], [`LongformPublisher`], [`Bot`]),
//! error types, and tracing initialization. Transport-agnostic; used by the
//! storage, external-services, and aggregator-bot crates.

pub mod bot;
pub mod error;
pub mod logger;
pub mod payload;
pub mod traits;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, FetchError, PublishError, StoreError};
pub use logger::init_tracing;
pub use payload::{ButtonPayload, PayloadError};
pub use traits::{ArticleFetcher, ArticleStore, LongformPublisher};
pub use types::{Article, ArticleField, Button, FetchedArticle, InboundEvent, Keyboard};
