//! Per-chat pending-edit state.
//!
//! A chat is either idle or waiting for the next message to carry the new
//! value for one article field. That second state is held here: at most one
//! [`PendingEdit`] per chat, bounded by a wall-clock TTL, consumed by a
//! single atomic take. The map provides its own synchronization; callers
//! never lock around it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use aggregator_core::ArticleField;

/// How long an edit request stays valid before the next message stops being
/// treated as its value.
pub const PENDING_EDIT_TTL: Duration = Duration::from_secs(600);

/// Marker that the next message from a chat is the new value for one field
/// of one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEdit {
    pub article_id: Uuid,
    pub field: ArticleField,
}

struct Entry {
    edit: PendingEdit,
    deadline: Instant,
}

/// Process-local, time-boxed map from chat id to pending edit.
#[derive(Clone, Default)]
pub struct SessionStore {
    entries: Arc<DashMap<i64, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the pending edit, replacing any existing one for the chat.
    pub fn set(&self, chat_id: i64, edit: PendingEdit, ttl: Duration) {
        self.entries.insert(
            chat_id,
            Entry {
                edit,
                deadline: Instant::now() + ttl,
            },
        );
    }

    /// Atomically removes and returns the chat's pending edit, if one exists
    /// and has not expired. Expired entries are discarded here; they are
    /// never returned. Two racing takes observe at most one `Some`.
    pub fn try_take(&self, chat_id: i64) -> Option<PendingEdit> {
        let (_, entry) = self.entries.remove(&chat_id)?;
        if Instant::now() < entry.deadline {
            Some(entry.edit)
        } else {
            None
        }
    }

    /// Removes any pending edit for the chat.
    pub fn clear(&self, chat_id: i64) {
        self.entries.remove(&chat_id);
    }
}
