// src/scheduler.rs
use rand::Rng;
use std::time::Duration;
use tracing::{error, info};

use crate::config::BotConfig;
use crate::engage::{self, EngageSummary};
use crate::feeds::FeedSource;
use crate::ledger::TitleLedger;
use crate::pacing::Pacer;
use crate::platform::Platform;
use crate::selector::{self, PostOutcome};

/// What one full cycle did, for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub post: PostOutcome,
    pub engage: EngageSummary,
}

/// One POST → ENGAGE pass. A ledger write failure aborts only the posting
/// phase (logged as error, since it risks a duplicate repost after restart);
/// engagement still runs and the scheduler keeps going.
pub async fn run_cycle<R: Rng + Send>(
    cfg: &BotConfig,
    sources: &[Box<dyn FeedSource>],
    ledger: &mut TitleLedger,
    platform: &dyn Platform,
    rng: &mut R,
    pacer: &dyn Pacer,
) -> CycleReport {
    let post = match selector::run_post_pass(sources, ledger, platform).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = ?e, "ledger write failed, aborting posting for this cycle");
            PostOutcome::Nothing
        }
    };
    let engage = engage::run_engage_pass(cfg, platform, rng, pacer).await;
    CycleReport { post, engage }
}

/// Fresh uniform draw for the inter-cycle sleep, inclusive on both ends.
pub fn next_cycle_sleep<R: Rng>(cfg: &BotConfig, rng: &mut R) -> Duration {
    Duration::from_secs(rng.random_range(cfg.cycle_sleep_secs.clone()))
}

/// Run cycles forever, sleeping a fresh uniform draw from the configured
/// range between each. There is no exit condition and no persisted cycle
/// count; a restart reloads the ledger and begins a fresh cycle. Component
/// failures only ever produce log lines.
pub async fn run_forever<R: Rng + Send>(
    cfg: &BotConfig,
    sources: &[Box<dyn FeedSource>],
    ledger: &mut TitleLedger,
    platform: &dyn Platform,
    rng: &mut R,
    pacer: &dyn Pacer,
) {
    loop {
        let report = run_cycle(cfg, sources, ledger, platform, rng, pacer).await;
        info!(
            post = ?report.post,
            acted = report.engage.acted,
            skipped = report.engage.skipped,
            failed = report.engage.failed,
            "cycle complete"
        );
        let sleep = next_cycle_sleep(cfg, rng);
        info!(secs = sleep.as_secs(), "sleeping until next cycle");
        pacer.pause(sleep).await;
    }
}
