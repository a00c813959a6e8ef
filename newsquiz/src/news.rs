//! News fetching against a GNews-compatible search endpoint.

use common::NewsConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// A single article as returned by the news provider.
///
/// Fields the provider omits deserialize to empty strings so downstream
/// rendering and prompt construction never have to special-case them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// Failures while fetching or decoding the article list.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("news request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("news provider returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed news payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("news API key env var '{0}' not set")]
    MissingApiKey(String),
}

/// Fetch the current article list with a single GET against the configured
/// search endpoint. One request, no retries; any non-2xx status or body that
/// does not decode surfaces as a `FetchError`.
pub async fn fetch_articles(cfg: &NewsConfig) -> Result<Vec<Article>, FetchError> {
    let api_key = std::env::var(cfg.api_key_env())
        .map_err(|_| FetchError::MissingApiKey(cfg.api_key_env().to_string()))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.fetch_timeout_seconds()))
        .user_agent("NewsQuiz/0.1.0")
        .build()?;

    let max = cfg.max_results().to_string();
    let response = client
        .get(cfg.api_url())
        .query(&[
            ("q", cfg.query()),
            ("lang", cfg.lang()),
            ("country", cfg.country()),
            ("max", max.as_str()),
            ("apikey", api_key.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    let parsed: SearchResponse = serde_json::from_str(&body)?;
    info!("fetched {} articles from news provider", parsed.articles.len());

    Ok(parsed.articles)
}
