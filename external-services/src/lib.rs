//! HTTP clients for the bot's external collaborators.
//!
//! - [`parser`] – ParserClient: fetches parsed article content from the
//!   external parsing service (implements `aggregator_core::ArticleFetcher`)
//! - [`telegraph`] – TelegraphClient: publishes oversized article bodies to
//!   Telegraph (implements `aggregator_core::LongformPublisher`)

pub mod parser;
pub mod telegraph;

pub use parser::ParserClient;
pub use telegraph::TelegraphClient;
