//! Core types: article, editable fields, inbound events, and keyboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A stored article. Owned by the [`crate::ArticleStore`]; the core only
/// reads and writes it by value through the store's interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub source_url: Url,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Builds a new article from fetched content, assigning a fresh id.
    pub fn from_fetched(fetched: FetchedArticle, source_url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: fetched.title,
            content: fetched.body,
            source_url,
            created_at: Utc::now(),
        }
    }
}

/// Title and body returned by the external parser for a source URL.
#[derive(Debug, Clone)]
pub struct FetchedArticle {
    pub title: String,
    pub body: String,
}

/// The closed set of article fields an admin can edit. Replaces by-name
/// dynamic assignment: unknown field names never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleField {
    Title,
    Content,
}

impl ArticleField {
    /// Canonical lower-case name used in button payloads and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Content => "content",
        }
    }

    /// Parses a canonical field name; `None` for anything else.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(ArticleField::Title),
            "content" => Some(ArticleField::Content),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound chat event, produced once per user action and never mutated.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// A plain text message.
    Message {
        chat_id: i64,
        sender_id: i64,
        text: String,
    },
    /// An inline-button press carrying the opaque payload the button was
    /// built with, plus the id of the message the button is attached to.
    ButtonPress {
        chat_id: i64,
        sender_id: i64,
        message_id: i32,
        payload: String,
    },
}

impl InboundEvent {
    pub fn chat_id(&self) -> i64 {
        match self {
            InboundEvent::Message { chat_id, .. } => *chat_id,
            InboundEvent::ButtonPress { chat_id, .. } => *chat_id,
        }
    }

    pub fn sender_id(&self) -> i64 {
        match self {
            InboundEvent::Message { sender_id, .. } => *sender_id,
            InboundEvent::ButtonPress { sender_id, .. } => *sender_id,
        }
    }
}

/// One inline button: visible label plus the opaque callback payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Button layout attached to an outbound message; rows of buttons.
/// Transport adapters map this to their native inline-keyboard type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }
}
