//! Binary for the articles aggregator Telegram bot.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use aggregator_bot::{
    build_components, run_dispatcher, ArticlePresenter, BotConfig, Cli, Commands,
    TelegramBotAdapter, UpdateDispatcher,
};
use aggregator_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}

async fn run(token: Option<String>) -> Result<()> {
    let config = BotConfig::load(token)?;
    config.validate()?;

    if let Some(dir) = Path::new(&config.log_file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        parser_base_url = %config.parser_base_url,
        admins = config.admin_ids.len(),
        "Initializing bot"
    );

    let components = build_components(&config).await?;
    let presenter = ArticlePresenter::new(components.publisher.clone());

    let bot = teloxide::Bot::new(config.bot_token.clone());
    let adapter = Arc::new(TelegramBotAdapter::new(bot.clone()));

    let dispatcher = Arc::new(UpdateDispatcher::new(
        adapter,
        components.store.clone(),
        components.fetcher.clone(),
        presenter,
        config.admin_ids.clone(),
    ));

    run_dispatcher(bot, dispatcher).await
}
