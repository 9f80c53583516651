//! Telegram transport layer: the [`aggregator_core::Bot`] adapter and the
//! teloxide update loop.

mod adapter;
mod runner;

pub use adapter::TelegramBotAdapter;
pub use runner::run_dispatcher;
