use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::http_client::http_client;
use crate::model::{self, Article, Match};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatusQuery {
    Upcoming,
    Played,
}

impl MatchStatusQuery {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Played => "played",
        }
    }
}

/// Read side of the club API. Transport failures never escape: collections
/// come back empty and single records absent.
pub trait ClubApi: Send + Sync {
    fn fetch_articles(&self, limit: usize) -> Vec<Article>;
    fn fetch_matches(&self, status: MatchStatusQuery, limit: usize) -> Vec<Match>;
    fn fetch_article_detail(&self, url: &str) -> Option<Article>;
    fn fetch_health(&self) -> bool;
}

pub struct HttpApi {
    client: &'static Client,
    base: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config.request_timeout_secs)?,
            base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base)
        } else {
            format!("{}/{path}", self.base)
        }
    }

    /// `Ok(None)` for a non-success status or a JSON `null` body.
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>> {
        let url = self.endpoint(path);
        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            debug!(%url, %status, "non-success response");
            return Ok(None);
        }
        let body = resp.text().context("failed reading body")?;
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(trimmed).context("invalid api json")?;
        Ok((!value.is_null()).then_some(value))
    }

    fn get_or_absent(&self, path: &str, query: &[(&str, String)]) -> Option<Value> {
        match self.get_json(path, query) {
            Ok(value) => value,
            Err(err) => {
                warn!(path, error = %format!("{err:#}"), "api request failed");
                None
            }
        }
    }
}

impl ClubApi for HttpApi {
    fn fetch_articles(&self, limit: usize) -> Vec<Article> {
        let data = self.get_or_absent("/articles", &[("limit", limit.to_string())]);
        let items = data.as_ref().map(model::parse_articles).unwrap_or_default();
        debug!(count = items.len(), "articles fetched");
        items
    }

    fn fetch_matches(&self, status: MatchStatusQuery, limit: usize) -> Vec<Match> {
        let data = self.get_or_absent(
            "/matches",
            &[
                ("status", status.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        );
        let items = data.as_ref().map(model::parse_matches).unwrap_or_default();
        debug!(status = status.as_str(), count = items.len(), "matches fetched");
        items
    }

    fn fetch_article_detail(&self, url: &str) -> Option<Article> {
        let data = self.get_or_absent("/articles/by-url", &[("url", url.to_string())])?;
        model::parse_article_detail(&data)
    }

    fn fetch_health(&self) -> bool {
        self.get_or_absent("/health", &[]).is_some()
    }
}
