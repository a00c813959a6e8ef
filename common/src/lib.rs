/*!
common/src/lib.rs

Shared configuration types for NewsQuiz.

This file provides:
- Config data structures (deserialized from TOML)
- An async loader for a TOML config file with default/override merging
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP server configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g. "0.0.0.0")
    pub bind: Option<String>,
    /// Listen port; the PORT environment variable takes precedence
    pub port: Option<u16>,
}

/// News provider configuration (GNews-compatible search endpoint)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsConfig {
    pub api_url: Option<String>,
    /// Search query sent to the provider
    pub query: Option<String>,
    pub lang: Option<String>,
    pub country: Option<String>,
    pub max_results: Option<u32>,
    /// Name of the environment variable holding the provider credential
    pub api_key_env: Option<String>,
    pub fetch_timeout_seconds: Option<u64>,
}

impl NewsConfig {
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or("https://gnews.io/api/v4/search")
    }

    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("example")
    }

    pub fn lang(&self) -> &str {
        self.lang.as_deref().unwrap_or("en")
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("us")
    }

    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(10)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or("NEWS_API_KEY")
    }

    pub fn fetch_timeout_seconds(&self) -> u64 {
        self.fetch_timeout_seconds.unwrap_or(10)
    }
}

/// Remote LLM config (used if `llm.adapter = "remote"`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    pub api_url: Option<String>,
    pub api_key_env: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_tokens: Option<usize>,
}

/// LLM top-level config grouping adapter specifics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub adapter: Option<String>, // "remote", "none"
    pub remote: Option<RemoteLlmConfig>,
}

/// Quiz generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Number of questions requested from the synthesizer
    pub question_count: Option<usize>,
}

impl QuizConfig {
    pub fn question_count(&self) -> usize {
        self.question_count.unwrap_or(5)
    }
}

/// Top-level application configuration (deserialized from config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub news: NewsConfig,
    pub llm: Option<LlmConfig>,
    pub quiz: Option<QuizConfig>,
}

impl Config {
    /// Load configuration from a TOML file asynchronously.
    ///
    /// Example:
    ///   let cfg = Config::from_file("config.toml").await?;
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = tokio::fs::read_to_string(path.as_ref())
            .await
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let cfg: Config = toml::from_str(&data).context("Failed to parse TOML configuration")?;
        Ok(cfg)
    }

    /// Load configuration with an optional default file and an optional override file.
    /// If both are present, they are merged (override takes precedence).
    pub async fn load_with_defaults(
        default_path: Option<&Path>,
        override_path: Option<&Path>,
    ) -> Result<Self> {
        let mut config_value = toml::Value::Table(toml::map::Map::new());

        if let Some(path) = default_path {
            if path.exists() {
                let data = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read default config: {}", path.display()))?;
                let val: toml::Value =
                    toml::from_str(&data).context("Failed to parse default configuration")?;
                merge_toml(&mut config_value, val);
            }
        }

        if let Some(path) = override_path {
            if path.exists() {
                let data = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read override config: {}", path.display()))?;
                let val: toml::Value =
                    toml::from_str(&data).context("Failed to parse override configuration")?;
                merge_toml(&mut config_value, val);
            }
        }

        let cfg: Config = config_value
            .try_into()
            .context("Failed to parse merged configuration")?;
        Ok(cfg)
    }

    pub fn question_count(&self) -> usize {
        self.quiz
            .as_ref()
            .map(|q| q.question_count())
            .unwrap_or(5)
    }
}

fn merge_toml(a: &mut toml::Value, b: toml::Value) {
    match (a, b) {
        (toml::Value::Table(a_map), toml::Value::Table(b_map)) => {
            for (k, v) in b_map {
                if let Some(a_val) = a_map.get_mut(&k) {
                    merge_toml(a_val, v);
                } else {
                    a_map.insert(k, v);
                }
            }
        }
        (a_val, b_val) => *a_val = b_val,
    }
}
