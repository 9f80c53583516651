//! Mock collaborators for dispatcher integration tests.
//!
//! The bot records every outbound call so tests can assert on what was sent
//! without hitting Telegram; fetcher and publisher return canned results.
//! The article store is the real SQLite repository on an in-memory database.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use url::Url;
use uuid::Uuid;

use aggregator_bot::{ArticlePresenter, UpdateDispatcher};
use aggregator_core::{
    Article, ArticleFetcher, Bot, BotError, FetchError, FetchedArticle, InboundEvent, Keyboard,
    LongformPublisher, PublishError,
};
use storage::ArticleRepository;

pub const ADMIN: i64 = 10;
pub const USER: i64 = 20;
pub const CHAT: i64 = 100;

pub const PUBLISHED_URL: &str = "https://telegra.ph/t-01-01";

/// One recorded outbound transport call.
#[derive(Debug, Clone)]
pub enum Outbound {
    Send {
        chat_id: i64,
        text: String,
    },
    SendHtml {
        chat_id: i64,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edit {
        chat_id: i64,
        message_id: i32,
        text: String,
    },
}

/// Bot that records every call instead of talking to a transport.
#[derive(Default)]
pub struct MockBot {
    outbound: Mutex<Vec<Outbound>>,
}

impl MockBot {
    pub fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbound.lock().unwrap())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        self.outbound.lock().unwrap().push(Outbound::Send {
            chat_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_html(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), BotError> {
        self.outbound.lock().unwrap().push(Outbound::SendHtml {
            chat_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
    ) -> Result<(), BotError> {
        self.outbound.lock().unwrap().push(Outbound::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Fetcher returning one canned article, or failing.
pub struct MockFetcher {
    title: String,
    body: String,
    fail: bool,
}

impl MockFetcher {
    pub fn ok(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ArticleFetcher for MockFetcher {
    async fn fetch(&self, _url: &Url) -> Result<FetchedArticle, FetchError> {
        if self.fail {
            return Err(FetchError::Http("mock fetch failure".to_string()));
        }
        Ok(FetchedArticle {
            title: self.title.clone(),
            body: self.body.clone(),
        })
    }
}

/// Publisher counting calls; returns a fixed page URL, or fails.
pub struct MockPublisher {
    calls: AtomicUsize,
    fail: bool,
}

impl MockPublisher {
    pub fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LongformPublisher for MockPublisher {
    async fn publish(&self, _title: &str, _body: &str) -> Result<Url, PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PublishError::Api("mock publish failure".to_string()));
        }
        Ok(Url::parse(PUBLISHED_URL).unwrap())
    }
}

/// Fully wired dispatcher over mocks plus an in-memory article repository.
pub struct TestHarness {
    pub dispatcher: UpdateDispatcher,
    pub bot: Arc<MockBot>,
    pub store: Arc<ArticleRepository>,
    pub publisher: Arc<MockPublisher>,
}

pub async fn harness(fetcher: MockFetcher, publisher_fails: bool) -> TestHarness {
    let bot = Arc::new(MockBot::default());
    let store = Arc::new(
        ArticleRepository::new("sqlite::memory:")
            .await
            .expect("Failed to create repository"),
    );
    let publisher = MockPublisher::new(publisher_fails);
    let presenter = ArticlePresenter::new(publisher.clone());

    let dispatcher = UpdateDispatcher::new(
        bot.clone(),
        store.clone(),
        Arc::new(fetcher),
        presenter,
        HashSet::from([ADMIN]),
    );

    TestHarness {
        dispatcher,
        bot,
        store,
        publisher,
    }
}

pub fn message(sender_id: i64, text: &str) -> InboundEvent {
    InboundEvent::Message {
        chat_id: CHAT,
        sender_id,
        text: text.to_string(),
    }
}

pub fn button(sender_id: i64, message_id: i32, payload: &str) -> InboundEvent {
    InboundEvent::ButtonPress {
        chat_id: CHAT,
        sender_id,
        message_id,
        payload: payload.to_string(),
    }
}

pub fn seeded_article(title: &str, body: &str) -> Article {
    Article {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: body.to_string(),
        source_url: Url::parse("https://example.com/a").unwrap(),
        created_at: Utc::now(),
    }
}
