//! Bot configuration, loaded from environment variables after
//! `dotenvy::dotenv()`. Immutable once built; the admin allow-list is
//! passed into the dispatcher at construction.

use std::collections::HashSet;
use std::env;

use anyhow::{Context, Result};
use url::Url;

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// ADMIN_IDS, comma-separated sender ids
    pub admin_ids: HashSet<i64>,
    /// DATABASE_URL (SQLite)
    pub database_url: String,
    /// PARSER_BASE_URL of the external article parsing service
    pub parser_base_url: Url,
    /// TELEGRAPH_TOKEN for long-form publishing
    pub telegraph_token: String,
    /// LOG_FILE path
    pub log_file: String,
}

impl BotConfig {
    /// Loads from environment variables. `token` overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };

        let admin_ids = parse_admin_ids(&env::var("ADMIN_IDS").unwrap_or_default())?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://articles.db".to_string());

        let parser_base_url = env::var("PARSER_BASE_URL")
            .map_err(|_| anyhow::anyhow!("PARSER_BASE_URL not set"))?
            .parse::<Url>()
            .context("PARSER_BASE_URL is not a valid URL")?;

        let telegraph_token =
            env::var("TELEGRAPH_TOKEN").map_err(|_| anyhow::anyhow!("TELEGRAPH_TOKEN not set"))?;

        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/aggregator-bot.log".to_string());

        Ok(Self {
            bot_token,
            admin_ids,
            database_url,
            parser_base_url,
            telegraph_token,
            log_file,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        match self.parser_base_url.scheme() {
            "http" | "https" => {}
            other => anyhow::bail!("PARSER_BASE_URL must be http or https, got {other}"),
        }
        Ok(())
    }
}

fn parse_admin_ids(raw: &str) -> Result<HashSet<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("ADMIN_IDS contains a non-numeric id: {s}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_ids_parse_with_spaces_and_empties() {
        let ids = parse_admin_ids("1, 42 ,,7").unwrap();
        assert_eq!(ids, HashSet::from([1, 42, 7]));
        assert!(parse_admin_ids("").unwrap().is_empty());
    }

    #[test]
    fn admin_ids_reject_garbage() {
        assert!(parse_admin_ids("1,abc").is_err());
    }
}
