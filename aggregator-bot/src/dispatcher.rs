//! Update dispatch: one inbound event in, exactly one side-effecting action
//! out.
//!
//! The per-chat state machine is implicit: a chat with a pending edit in the
//! [`SessionStore`] is awaiting the value message, everything else is idle.
//! An admin message first tries to consume a pending edit; only then is it
//! parsed as a command. Button presses are decoded from their payload;
//! a payload that fails to decode is upstream garbage and the event is
//! logged and dropped, never answered.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use aggregator_core::{
    Article, ArticleField, ArticleFetcher, ArticleStore, Bot, ButtonPayload, InboundEvent,
};
use url::Url;
use uuid::Uuid;

use crate::presenter::{edit_menu, search_results_keyboard, ArticlePresenter};
use crate::router::{route, Action};
use crate::session::{PendingEdit, SessionStore, PENDING_EDIT_TTL};

// ---------- User-facing messages ----------
pub const MSG_ARTICLE_NOT_FOUND: &str = "❗️ Article not found.";
pub const MSG_DELETED: &str = "✅ Article deleted.";
pub const MSG_DELETE_NOT_FOUND: &str = "❗️ Not found.";
pub const MSG_NOTHING_FOUND: &str = "Nothing found 😔";
pub const MSG_SEARCH_RESULTS: &str = "Found these articles:";
pub const MSG_FETCH_FAILED: &str = "🚨 Could not fetch an article from that link.";
pub const MSG_ADD_FAILED: &str = "🚨 Could not add the article.";
pub const MSG_STORE_FAILED: &str = "🚨 Something went wrong. Try again later.";
pub const MSG_PUBLISH_FAILED: &str = "🚨 Could not prepare the article for display.";

pub fn welcome_text(is_admin: bool) -> String {
    let mut text = String::from(
        "👋 Hi! I search the article archive.\n\n— Type an article title and I will look for it.",
    );
    if is_admin {
        text.push_str(
            "\n\n🛠 You are an administrator.\n— Admins can add articles with /link and edit or delete them.",
        );
    }
    text
}

pub fn edit_prompt(field: ArticleField) -> String {
    format!("Enter the new value for <b>{field}</b>:")
}

/// Top-level entry point: routes each [`InboundEvent`] to exactly one action
/// against the collaborators and sends the outcome back through the bot.
pub struct UpdateDispatcher {
    bot: Arc<dyn Bot>,
    store: Arc<dyn ArticleStore>,
    fetcher: Arc<dyn ArticleFetcher>,
    presenter: ArticlePresenter,
    sessions: SessionStore,
    admins: HashSet<i64>,
}

impl UpdateDispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        store: Arc<dyn ArticleStore>,
        fetcher: Arc<dyn ArticleFetcher>,
        presenter: ArticlePresenter,
        admins: HashSet<i64>,
    ) -> Self {
        Self {
            bot,
            store,
            fetcher,
            presenter,
            sessions: SessionStore::new(),
            admins,
        }
    }

    fn is_admin(&self, sender_id: i64) -> bool {
        self.admins.contains(&sender_id)
    }

    /// Handles one event end-to-end. Collaborator failures become fixed
    /// user-facing lines here; an `Err` from this function means the
    /// outbound transport itself failed.
    pub async fn dispatch(&self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::Message {
                chat_id,
                sender_id,
                text,
            } => self.handle_message(chat_id, sender_id, &text).await,
            InboundEvent::ButtonPress {
                chat_id,
                sender_id,
                message_id,
                payload,
            } => {
                self.handle_button(chat_id, sender_id, message_id, &payload)
                    .await
            }
        }
    }

    async fn handle_message(&self, chat_id: i64, sender_id: i64, text: &str) -> Result<()> {
        let is_admin = self.is_admin(sender_id);

        // Pending state is only ever set for admin chats, and a non-admin
        // message must not consume it.
        if is_admin {
            if let Some(pending) = self.sessions.try_take(chat_id) {
                return self.apply_pending_edit(chat_id, pending, text).await;
            }
        }

        match route(text, is_admin) {
            Action::Welcome { is_admin } => {
                self.bot.send_message(chat_id, &welcome_text(is_admin)).await?;
            }
            Action::RejectLink { errors } => {
                self.bot.send_message(chat_id, &errors.join("\n")).await?;
            }
            Action::AddArticle { url } => self.handle_link(chat_id, url).await?,
            Action::Search { query } => self.handle_search(chat_id, &query).await?,
        }
        Ok(())
    }

    async fn handle_button(
        &self,
        chat_id: i64,
        sender_id: i64,
        message_id: i32,
        payload: &str,
    ) -> Result<()> {
        let payload = match ButtonPayload::parse(payload) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, chat_id, "Dropping malformed button payload");
                return Ok(());
            }
        };

        let is_admin = self.is_admin(sender_id);
        match payload {
            ButtonPayload::Show(id) => self.handle_show(chat_id, id, is_admin).await,
            ButtonPayload::Delete(id) if is_admin => {
                self.handle_delete(chat_id, message_id, id).await
            }
            ButtonPayload::Edit(id, field) if is_admin => {
                self.handle_edit_request(chat_id, message_id, id, field).await
            }
            _ => {
                info!(chat_id, sender_id, "Ignoring admin-only button press from non-admin");
                Ok(())
            }
        }
    }

    /// The value message for a previously requested field edit. The pending
    /// entry is already consumed; whatever happens next, the chat is idle.
    async fn apply_pending_edit(
        &self,
        chat_id: i64,
        pending: PendingEdit,
        value: &str,
    ) -> Result<()> {
        let updated = match self
            .store
            .update_field(pending.article_id, pending.field, value)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                warn!(error = %e, article_id = %pending.article_id, "Field update failed");
                return self.bot.send_message(chat_id, MSG_STORE_FAILED).await.map_err(Into::into);
            }
        };

        if !updated {
            // Deleted while the edit was pending.
            return self
                .bot
                .send_message(chat_id, MSG_ARTICLE_NOT_FOUND)
                .await
                .map_err(Into::into);
        }

        match self.store.get_by_id(pending.article_id).await {
            Ok(Some(article)) => self.send_article(chat_id, &article, true).await,
            Ok(None) => self
                .bot
                .send_message(chat_id, MSG_ARTICLE_NOT_FOUND)
                .await
                .map_err(Into::into),
            Err(e) => {
                warn!(error = %e, article_id = %pending.article_id, "Re-fetch after edit failed");
                self.bot
                    .send_message(chat_id, MSG_STORE_FAILED)
                    .await
                    .map_err(Into::into)
            }
        }
    }

    async fn handle_link(&self, chat_id: i64, url: Url) -> Result<()> {
        let fetched = match self.fetcher.fetch(&url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(error = %e, source_url = %url, "Fetch failed");
                return self.bot.send_message(chat_id, MSG_FETCH_FAILED).await.map_err(Into::into);
            }
        };

        let article = Article::from_fetched(fetched, url);
        if let Err(e) = self.store.add(&article).await {
            warn!(error = %e, source_url = %article.source_url, "Store add failed");
            return self.bot.send_message(chat_id, MSG_ADD_FAILED).await.map_err(Into::into);
        }

        self.send_article(chat_id, &article, true).await
    }

    async fn handle_search(&self, chat_id: i64, query: &str) -> Result<()> {
        let results = match self.store.search_by_title(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, query, "Search failed");
                return self.bot.send_message(chat_id, MSG_STORE_FAILED).await.map_err(Into::into);
            }
        };

        if results.is_empty() {
            return self.bot.send_message(chat_id, MSG_NOTHING_FOUND).await.map_err(Into::into);
        }

        let keyboard = search_results_keyboard(&results);
        self.bot
            .send_html(chat_id, MSG_SEARCH_RESULTS, Some(&keyboard))
            .await
            .map_err(Into::into)
    }

    async fn handle_show(&self, chat_id: i64, id: Uuid, is_admin: bool) -> Result<()> {
        match self.store.get_by_id(id).await {
            Ok(Some(article)) => self.send_article(chat_id, &article, is_admin).await,
            Ok(None) => self
                .bot
                .send_message(chat_id, MSG_ARTICLE_NOT_FOUND)
                .await
                .map_err(Into::into),
            Err(e) => {
                warn!(error = %e, article_id = %id, "Show failed");
                self.bot
                    .send_message(chat_id, MSG_STORE_FAILED)
                    .await
                    .map_err(Into::into)
            }
        }
    }

    async fn handle_delete(&self, chat_id: i64, message_id: i32, id: Uuid) -> Result<()> {
        let text = match self.store.remove(id).await {
            Ok(true) => MSG_DELETED,
            Ok(false) => MSG_DELETE_NOT_FOUND,
            Err(e) => {
                warn!(error = %e, article_id = %id, "Delete failed");
                MSG_STORE_FAILED
            }
        };
        self.bot
            .edit_message(chat_id, message_id, text)
            .await
            .map_err(Into::into)
    }

    /// Idle → AwaitingEditValue for this chat; the next admin message is the
    /// value.
    async fn handle_edit_request(
        &self,
        chat_id: i64,
        message_id: i32,
        id: Uuid,
        field: ArticleField,
    ) -> Result<()> {
        self.sessions.set(
            chat_id,
            PendingEdit {
                article_id: id,
                field,
            },
            PENDING_EDIT_TTL,
        );
        self.bot
            .edit_message(chat_id, message_id, &edit_prompt(field))
            .await
            .map_err(Into::into)
    }

    /// Presents an article; a long-form publish failure is surfaced as one
    /// fixed line and no truncated preview goes out.
    async fn send_article(&self, chat_id: i64, article: &Article, is_admin: bool) -> Result<()> {
        let presented = match self.presenter.present(article).await {
            Ok(presented) => presented,
            Err(e) => {
                warn!(error = %e, article_id = %article.id, "Long-form publish failed");
                return self
                    .bot
                    .send_message(chat_id, MSG_PUBLISH_FAILED)
                    .await
                    .map_err(Into::into);
            }
        };

        let menu = is_admin.then(|| edit_menu(article.id));
        self.bot
            .send_html(chat_id, &presented.text, menu.as_ref())
            .await
            .map_err(Into::into)
    }
}
