// src/feeds/mod.rs
pub mod rss;

use anyhow::Result;
use once_cell::sync::OnceCell;
use regex::Regex;

/// Newest entry of a feed, read fresh each cycle. Nothing here is persisted;
/// only the title string survives (in the ledger) once posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
}

/// One configured feed endpoint. The post selector walks sources in declared
/// order and treats a fetch error the same as "no usable entry".
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// The single most-recent entry, or `None` when the feed yields nothing.
    async fn newest(&self) -> Result<Option<FeedItem>>;
    fn name(&self) -> &str;
}

/// Normalize a headline: decode HTML entities, strip tags, collapse
/// whitespace, trim.
pub fn normalize_title(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}
