// src/engage.rs
use anyhow::Result;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::pacing::Pacer;
use crate::platform::{FoundPost, Platform};

/// One of the three engagement actions, picked uniformly at random per
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngageAction {
    Reply,
    Favorite,
    Reshare,
}

impl EngageAction {
    fn pick<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => Self::Reply,
            1 => Self::Favorite,
            _ => Self::Reshare,
        }
    }
}

/// Explicit tally of one engagement pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngageSummary {
    pub acted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Search for candidate posts and act on each one not already favorited.
/// The platform's favorited flag is the only repeat-avoidance signal: a
/// reply favorites afterwards to mark completion, a plain favorite marks
/// itself, but a reshare favorites nothing — so a reshared post can be
/// picked up again in a later cycle. Inherited behavior, kept as-is.
pub async fn run_engage_pass<R: Rng + Send>(
    cfg: &BotConfig,
    platform: &dyn Platform,
    rng: &mut R,
    pacer: &dyn Pacer,
) -> EngageSummary {
    let mut summary = EngageSummary::default();
    let query = cfg.search_query();
    let posts = match platform
        .search(&query, &cfg.search_lang, cfg.search_limit)
        .await
    {
        Ok(p) => p,
        Err(e) => {
            warn!(error = ?e, "search failed, skipping engagement pass");
            return summary;
        }
    };

    for post in posts {
        if post.favorited {
            debug!(id = %post.id, "already favorited, skipping");
            summary.skipped += 1;
            continue;
        }
        let action = EngageAction::pick(rng);
        match engage_one(cfg, platform, rng, &post, action).await {
            Ok(()) => {
                summary.acted += 1;
                info!(id = %post.id, author = %post.author, ?action, "engaged");
            }
            Err(e) => {
                summary.failed += 1;
                warn!(id = %post.id, error = ?e, "engagement failed, continuing");
            }
        }
        // Human-like cadence between actions, under the platform rate limit.
        let pause = rng.random_range(cfg.action_pause_secs.clone());
        pacer.pause(Duration::from_secs(pause)).await;
    }
    summary
}

async fn engage_one<R: Rng>(
    cfg: &BotConfig,
    platform: &dyn Platform,
    rng: &mut R,
    post: &FoundPost,
    action: EngageAction,
) -> Result<()> {
    match action {
        EngageAction::Reply => {
            let phrase = &cfg.reply_phrases[rng.random_range(0..cfg.reply_phrases.len())];
            platform.reply(&post.id, phrase).await?;
            // Favorite marks the reply as done for future searches.
            platform.favorite(&post.id).await?;
        }
        EngageAction::Favorite => platform.favorite(&post.id).await?,
        EngageAction::Reshare => platform.reshare(&post.id).await?,
    }
    Ok(())
}
