//! Client for the external article parsing service.
//!
//! The service takes a source URL as a plain-text request body on
//! `GET /getArticles` and answers with `{"message": {"title", "data"}}`.
//! Retries are the service's own concern; one request per fetch here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::info;
use url::Url;

use aggregator_core::{ArticleFetcher, FetchError, FetchedArticle};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ParserClient {
    base_url: Url,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ResponseWrapper {
    message: Option<ParsedArticleDto>,
}

#[derive(Deserialize)]
struct ParsedArticleDto {
    title: String,
    data: String,
}

impl ParserClient {
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { base_url, http })
    }
}

#[async_trait]
impl ArticleFetcher for ParserClient {
    async fn fetch(&self, url: &Url) -> Result<FetchedArticle, FetchError> {
        let endpoint = self
            .base_url
            .join("/getArticles")
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let response = self
            .http
            .get(endpoint)
            .header(CONTENT_TYPE, "text/plain")
            .body(url.to_string())
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let wrapper: ResponseWrapper = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        let dto = wrapper
            .message
            .ok_or_else(|| FetchError::InvalidResponse("parser returned no article".to_string()))?;

        info!(source_url = %url, title = %dto.title, "Fetched article from parser");
        Ok(FetchedArticle {
            title: dto.title,
            body: dto.data,
        })
    }
}
