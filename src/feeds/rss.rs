// src/feeds/rss.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;

use super::{normalize_title, FeedItem, FeedSource};

const FETCH_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = "sportswire-bot/0.1 (rss poller)";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
}

/// Live RSS endpoint polled over HTTP. Only the first (newest) entry is ever
/// considered; there is no backfill.
pub struct RssFeedSource {
    name: String,
    url: String,
    client: reqwest::Client,
}

impl RssFeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }

    /// Shared HTTP client for all feed sources.
    pub fn http_client() -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("building feed http client")
    }

    /// Parse a feed snapshot and return its newest usable item. The first
    /// `<item>` decides: if it lacks a title or link, the feed yields
    /// nothing this cycle.
    pub fn newest_from_str(xml: &str) -> Result<Option<FeedItem>> {
        let rss: Rss = from_str(xml).context("parsing rss xml")?;
        let first = match rss.channel.item.into_iter().next() {
            Some(it) => it,
            None => return Ok(None),
        };
        let title = first
            .title
            .as_deref()
            .map(normalize_title)
            .unwrap_or_default();
        let link = first
            .link
            .map(|l| l.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            return Ok(None);
        }
        Ok(Some(FeedItem { title, link }))
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn newest(&self) -> Result<Option<FeedItem>> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("fetching feed {}", self.name))?
            .error_for_status()
            .with_context(|| format!("feed {} returned error status", self.name))?
            .text()
            .await
            .with_context(|| format!("reading feed {} body", self.name))?;
        Self::newest_from_str(&body)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
