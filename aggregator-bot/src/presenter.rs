//! Article presentation: HTML preview text, the overflow policy, and the
//! keyboard builders.
//!
//! Bodies over [`MESSAGE_BODY_LIMIT`] characters cannot go out in one
//! message: the preview is truncated and the full content is published
//! through the long-form collaborator, whose URL is appended as a
//! "read more" reference. The length check counts characters of the exact
//! body text that would be sent, not bytes.

use std::sync::Arc;

use url::Url;
use uuid::Uuid;

use aggregator_core::{
    Article, ArticleField, Button, ButtonPayload, Keyboard, LongformPublisher, PublishError,
};

/// Single-message body limit of the transport, in characters.
pub const MESSAGE_BODY_LIMIT: usize = 3800;

/// Hard cap on rendered search results; extra matches are dropped.
pub const SEARCH_RESULT_CAP: usize = 20;

const BUTTON_TITLE_LIMIT: usize = 50;
const ELLIPSIS: char = '…';

/// Display text plus the long-form reference when the body overflowed.
#[derive(Debug, Clone)]
pub struct Presented {
    pub text: String,
    pub read_more: Option<Url>,
}

pub struct ArticlePresenter {
    publisher: Arc<dyn LongformPublisher>,
}

impl ArticlePresenter {
    pub fn new(publisher: Arc<dyn LongformPublisher>) -> Self {
        Self { publisher }
    }

    /// Formats the article for display. Publishes the full body exactly once
    /// when it overflows; a publish failure propagates instead of degrading
    /// to a truncated preview with no reference.
    pub async fn present(&self, article: &Article) -> Result<Presented, PublishError> {
        if article.content.chars().count() <= MESSAGE_BODY_LIMIT {
            return Ok(Presented {
                text: render(article, &article.content, None),
                read_more: None,
            });
        }

        let mut truncated: String = article.content.chars().take(MESSAGE_BODY_LIMIT).collect();
        truncated.push(ELLIPSIS);

        let url = self
            .publisher
            .publish(&article.title, &article.content)
            .await?;

        Ok(Presented {
            text: render(article, &truncated, Some(&url)),
            read_more: Some(url),
        })
    }
}

fn render(article: &Article, body: &str, read_more: Option<&Url>) -> String {
    let mut text = format!(
        "📰 <b>{}</b>\n<i>{}</i>\n\n<code>{}</code>",
        article.title, body, article.source_url
    );
    if let Some(url) = read_more {
        text.push_str(&format!("\n🔗 <a href=\"{url}\">Read more</a>"));
    }
    text
}

/// Edit/delete menu attached to an article preview for admins.
pub fn edit_menu(article_id: Uuid) -> Keyboard {
    Keyboard::new(vec![
        vec![
            Button::new(
                "✏️ Title",
                ButtonPayload::Edit(article_id, ArticleField::Title).encode(),
            ),
            Button::new(
                "✏️ Content",
                ButtonPayload::Edit(article_id, ArticleField::Content).encode(),
            ),
        ],
        vec![Button::new("🗑 Delete", ButtonPayload::Delete(article_id).encode())],
    ])
}

/// One button per match, capped at [`SEARCH_RESULT_CAP`], no pagination.
pub fn search_results_keyboard(articles: &[Article]) -> Keyboard {
    let rows = articles
        .iter()
        .take(SEARCH_RESULT_CAP)
        .map(|a| vec![Button::new(short_title(&a.title), ButtonPayload::Show(a.id).encode())])
        .collect();
    Keyboard::new(rows)
}

fn short_title(title: &str) -> String {
    if title.chars().count() > BUTTON_TITLE_LIMIT {
        let mut short: String = title.chars().take(BUTTON_TITLE_LIMIT - 1).collect();
        short.push(ELLIPSIS);
        short
    } else {
        title.to_string()
    }
}
