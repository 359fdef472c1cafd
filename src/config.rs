// src/config.rs
use anyhow::{Context, Result};
use std::ops::RangeInclusive;
use std::path::PathBuf;

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_SECRET: &str = "API_SECRET";
pub const ENV_ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ENV_ACCESS_SECRET: &str = "ACCESS_SECRET";

pub const ENV_LEDGER_PATH: &str = "BOT_LEDGER_PATH";
pub const ENV_LOG_PATH: &str = "BOT_LOG_PATH";
pub const ENV_API_BASE: &str = "BOT_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://api.twitter.com/1.1";

/// Feed sources in priority order. Declaration order is the walk order.
const RSS_FEEDS: &[(&str, &str)] = &[
    ("espn-top", "https://www.espn.com/espn/rss/news"),
    ("espn-nfl", "https://www.espn.com/espn/rss/nfl/news"),
    ("espn-mlb", "https://www.espn.com/espn/rss/mlb/news"),
    ("espn-nba", "https://www.espn.com/espn/rss/nba/news"),
];

const SEARCH_TERMS: &[&str] = &["NFL", "NBA", "Yankees", "Touchdown", "Goal"];

const REPLY_PHRASES: &[&str] = &[
    "🔥 What a play!",
    "👀 Did you catch that?",
    "👏 Pure hustle right there.",
    "💯 Facts!",
    "🏆 Championship vibes.",
];

/// OAuth 1.0a credentials, all four required at startup.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl Credentials {
    /// Read credentials from the environment. A missing variable is a fatal
    /// startup error; the message names the variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            api_secret: require(ENV_API_SECRET)?,
            access_token: require(ENV_ACCESS_TOKEN)?,
            access_secret: require(ENV_ACCESS_SECRET)?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("missing required credential env var {name}"))
}

/// Fixed bot configuration: feed list, search terms, reply phrases, timing
/// ranges. Paths and the API base can be overridden via env; there are no
/// CLI flags.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// (name, url) pairs, walked in declared order by the post selector.
    pub feeds: Vec<(String, String)>,
    pub search_terms: Vec<String>,
    pub reply_phrases: Vec<String>,
    pub search_limit: u32,
    pub search_lang: String,
    /// Pause between engagement actions, seconds, inclusive.
    pub action_pause_secs: RangeInclusive<u64>,
    /// Sleep between full cycles, seconds, inclusive.
    pub cycle_sleep_secs: RangeInclusive<u64>,
    pub ledger_path: PathBuf,
    pub log_path: PathBuf,
    pub api_base: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            feeds: RSS_FEEDS
                .iter()
                .map(|(n, u)| (n.to_string(), u.to_string()))
                .collect(),
            search_terms: SEARCH_TERMS.iter().map(|s| s.to_string()).collect(),
            reply_phrases: REPLY_PHRASES.iter().map(|s| s.to_string()).collect(),
            search_limit: 3,
            search_lang: "en".to_string(),
            action_pause_secs: 15..=40,
            cycle_sleep_secs: 1500..=2700,
            ledger_path: PathBuf::from("posted_titles.txt"),
            log_path: PathBuf::from("bot.log"),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl BotConfig {
    /// Defaults plus env overrides for the ledger path, log path and API base.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(p) = std::env::var(ENV_LEDGER_PATH) {
            cfg.ledger_path = PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(ENV_LOG_PATH) {
            cfg.log_path = PathBuf::from(p);
        }
        if let Ok(b) = std::env::var(ENV_API_BASE) {
            cfg.api_base = b;
        }
        cfg
    }

    /// Search query: terms joined with logical OR.
    pub fn search_query(&self) -> String {
        self.search_terms.join(" OR ")
    }
}
