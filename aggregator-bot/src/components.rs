//! Builds the Arc'd collaborators the dispatcher depends on.

use std::sync::Arc;

use anyhow::Result;

use aggregator_core::{ArticleFetcher, ArticleStore, LongformPublisher};
use external_services::{ParserClient, TelegraphClient};
use storage::ArticleRepository;

use crate::config::BotConfig;

pub struct BotComponents {
    pub store: Arc<dyn ArticleStore>,
    pub fetcher: Arc<dyn ArticleFetcher>,
    pub publisher: Arc<dyn LongformPublisher>,
}

pub async fn build_components(config: &BotConfig) -> Result<BotComponents> {
    let repo = ArticleRepository::new(&config.database_url).await?;
    let parser = ParserClient::new(config.parser_base_url.clone())?;
    let telegraph = TelegraphClient::new(config.telegraph_token.clone())?;

    Ok(BotComponents {
        store: Arc::new(repo),
        fetcher: Arc::new(parser),
        publisher: Arc::new(telegraph),
    })
}
