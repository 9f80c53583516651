//! Telegraph publishing client.
//!
//! Publishes an article as a Telegraph page via `createPage`. The body is
//! split into paragraph nodes on newlines; Telegraph rejects serialized
//! content over 64 KiB, so the node list is trimmed to fit and the dropped
//! tail is replaced with an ellipsis node.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use url::Url;

use aggregator_core::{LongformPublisher, PublishError};

const API_BASE: &str = "https://api.telegra.ph";
const CONTENT_LIMIT_BYTES: usize = 64 * 1024;
const ELLIPSIS: &str = "…";

pub struct TelegraphClient {
    token: String,
    base_url: Url,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct Node {
    tag: &'static str,
    children: Vec<String>,
}

fn paragraph(text: String) -> Node {
    Node {
        tag: "p",
        children: vec![text],
    }
}

fn serialized_len(nodes: &[Node]) -> usize {
    serde_json::to_string(nodes).map(|s| s.len()).unwrap_or(usize::MAX)
}

/// Accumulates paragraph nodes until the serialized content would exceed the
/// Telegraph limit; the first paragraph that does not fit is dropped and an
/// ellipsis node marks the cut.
fn build_nodes(body: &str) -> Vec<Node> {
    let mut nodes = Vec::new();

    for para in body.split('\n').filter(|p| !p.trim().is_empty()) {
        nodes.push(paragraph(para.to_string()));

        if serialized_len(&nodes) > CONTENT_LIMIT_BYTES {
            nodes.pop();
            nodes.push(paragraph(ELLIPSIS.to_string()));
            break;
        }
    }

    if nodes.is_empty() {
        nodes.push(paragraph(body.trim().to_string()));
    }

    nodes
}

#[derive(Deserialize)]
struct PageResponse {
    ok: bool,
    result: Option<Page>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Page {
    url: Url,
}

impl TelegraphClient {
    pub fn new(token: String) -> Result<Self, reqwest::Error> {
        // API_BASE is a valid literal; parse cannot fail.
        let base_url = Url::parse(API_BASE).expect("invalid Telegraph API base");
        Self::with_base_url(token, base_url)
    }

    /// Constructor with an explicit API base; used by tests against a local
    /// mock server.
    pub fn with_base_url(token: String, base_url: Url) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            token,
            base_url,
            http,
        })
    }
}

#[async_trait]
impl LongformPublisher for TelegraphClient {
    async fn publish(&self, title: &str, body: &str) -> Result<Url, PublishError> {
        let nodes = build_nodes(body);
        let content =
            serde_json::to_string(&nodes).map_err(|e| PublishError::Api(e.to_string()))?;

        let endpoint = self
            .base_url
            .join("/createPage")
            .map_err(|e| PublishError::Api(e.to_string()))?;

        let response = self
            .http
            .post(endpoint)
            .form(&[
                ("access_token", self.token.as_str()),
                ("title", title),
                ("content", content.as_str()),
                ("return_content", "false"),
            ])
            .send()
            .await
            .map_err(|e| PublishError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| PublishError::Http(e.to_string()))?;

        let page: PageResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Api(e.to_string()))?;

        if !page.ok {
            let reason = page.error.unwrap_or_else(|| "unknown error".to_string());
            error!(reason = %reason, "Telegraph rejected the page");
            return Err(PublishError::Api(reason));
        }

        let url = page
            .result
            .map(|p| p.url)
            .ok_or_else(|| PublishError::Api("missing result in response".to_string()))?;

        info!(page_url = %url, "Published long-form article");
        Ok(url)
    }
}
