// src/platform/mod.rs
pub mod http;
pub mod oauth;

use anyhow::Result;

pub use http::HttpPlatform;

/// A post matched by keyword search. Ephemeral: repeat-avoidance for
/// engagement relies entirely on the platform-supplied `favorited` flag,
/// never on local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPost {
    pub id: String,
    pub author: String,
    pub favorited: bool,
}

/// Outbound platform collaborator. Every call may fail independently;
/// callers treat failure as recoverable and continue.
#[async_trait::async_trait]
pub trait Platform: Send + Sync {
    async fn post_status(&self, text: &str) -> Result<()>;
    async fn search(&self, query: &str, lang: &str, limit: u32) -> Result<Vec<FoundPost>>;
    /// Reply to a post; reply metadata is populated by the platform.
    async fn reply(&self, in_reply_to: &str, text: &str) -> Result<()>;
    async fn favorite(&self, id: &str) -> Result<()>;
    async fn reshare(&self, id: &str) -> Result<()>;
}
