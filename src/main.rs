//! Sportswire bot — binary entrypoint.
//! Loads credentials, opens the title ledger, and runs the post/engage
//! cycle forever. Behavior is fully defined by environment variables and
//! the fixed constants in `config.rs`; there are no CLI flags.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sportswire_bot::config::{BotConfig, Credentials};
use sportswire_bot::feeds::{rss::RssFeedSource, FeedSource};
use sportswire_bot::ledger::TitleLedger;
use sportswire_bot::pacing::TokioPacer;
use sportswire_bot::platform::HttpPlatform;
use sportswire_bot::scheduler;

/// Timestamped line stream to both the console and an append-mode log file.
fn init_tracing(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let cfg = BotConfig::from_env();
    init_tracing(&cfg.log_path)?;

    // Missing credentials are a fatal startup error.
    let creds = Credentials::from_env()?;

    let mut ledger = TitleLedger::load(&cfg.ledger_path)?;
    info!(
        ledger = ledger.len(),
        feeds = cfg.feeds.len(),
        "starting sportswire bot"
    );

    let platform = HttpPlatform::new(creds, &cfg.api_base)?;

    let client = RssFeedSource::http_client()?;
    let sources: Vec<Box<dyn FeedSource>> = cfg
        .feeds
        .iter()
        .map(|(name, url)| {
            Box::new(RssFeedSource::new(name.clone(), url.clone(), client.clone()))
                as Box<dyn FeedSource>
        })
        .collect();

    let mut rng = StdRng::from_os_rng();
    scheduler::run_forever(&cfg, &sources, &mut ledger, &platform, &mut rng, &TokioPacer).await;
    Ok(())
}
