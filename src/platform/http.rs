// src/platform/http.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::time::Duration;

use super::oauth::OauthSigner;
use super::{FoundPost, Platform};
use crate::config::Credentials;

const CALL_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = "sportswire-bot/0.1";

/// Concrete platform client over a Twitter-v1.1-style REST surface. One
/// long-lived client and signer for the process lifetime; the base URL is
/// configurable so tests and alternate deployments can point elsewhere.
pub struct HttpPlatform {
    base: String,
    client: reqwest::Client,
    signer: OauthSigner,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    statuses: Vec<Status>,
}
#[derive(Debug, Deserialize)]
struct Status {
    id_str: String,
    user: User,
    #[serde(default)]
    favorited: bool,
}
#[derive(Debug, Deserialize)]
struct User {
    screen_name: String,
}

impl HttpPlatform {
    pub fn new(creds: Credentials, base: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CALL_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("building platform http client")?;
        Ok(Self {
            base: base.into().trim_end_matches('/').to_string(),
            client,
            signer: OauthSigner::new(creds),
        })
    }

    async fn post_form(&self, path: &str, params: &[(&str, &str)]) -> Result<()> {
        let url = format!("{}/{}", self.base, path);
        let auth = self.signer.authorize("POST", &url, params);
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth)
            .form(&params.to_vec())
            .send()
            .await
            .with_context(|| format!("platform call {path}"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("platform call {path} failed: {status}: {body}"));
        }
        Ok(())
    }
}

#[async_trait]
impl Platform for HttpPlatform {
    async fn post_status(&self, text: &str) -> Result<()> {
        self.post_form("statuses/update.json", &[("status", text)])
            .await
    }

    async fn search(&self, query: &str, lang: &str, limit: u32) -> Result<Vec<FoundPost>> {
        let url = format!("{}/search/tweets.json", self.base);
        let count = limit.to_string();
        let params = [("count", count.as_str()), ("lang", lang), ("q", query)];
        let auth = self.signer.authorize("GET", &url, &params);
        let resp = self
            .client
            .get(&url)
            .header(AUTHORIZATION, auth)
            .query(&params)
            .send()
            .await
            .context("platform search call")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("platform search failed: {status}: {body}"));
        }
        let parsed: SearchResponse = resp.json().await.context("decoding search response")?;
        Ok(parsed
            .statuses
            .into_iter()
            .map(|s| FoundPost {
                id: s.id_str,
                author: s.user.screen_name,
                favorited: s.favorited,
            })
            .collect())
    }

    async fn reply(&self, in_reply_to: &str, text: &str) -> Result<()> {
        self.post_form(
            "statuses/update.json",
            &[
                ("auto_populate_reply_metadata", "true"),
                ("in_reply_to_status_id", in_reply_to),
                ("status", text),
            ],
        )
        .await
    }

    async fn favorite(&self, id: &str) -> Result<()> {
        self.post_form("favorites/create.json", &[("id", id)]).await
    }

    async fn reshare(&self, id: &str) -> Result<()> {
        let path = format!("statuses/retweet/{id}.json");
        self.post_form(&path, &[]).await
    }
}
