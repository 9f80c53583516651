//! # aggregator-bot
//!
//! Application crate: update dispatch, per-chat session state, command
//! routing, article presentation, and the Telegram transport layer. Wires
//! the storage and external-services collaborators behind the core traits
//! and runs the teloxide update loop.

pub mod cli;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod presenter;
pub mod router;
pub mod session;
pub mod telegram;

pub use cli::{Cli, Commands};
pub use components::{build_components, BotComponents};
pub use config::BotConfig;
pub use dispatcher::UpdateDispatcher;
pub use presenter::{ArticlePresenter, Presented, MESSAGE_BODY_LIMIT};
pub use session::{PendingEdit, SessionStore, PENDING_EDIT_TTL};
pub use telegram::{run_dispatcher, TelegramBotAdapter};
