// src/selector.rs
use anyhow::Result;
use tracing::{info, warn};

use crate::feeds::FeedSource;
use crate::ledger::TitleLedger;
use crate::platform::Platform;

/// Fixed decorative prefix for outbound headline posts.
const POST_PREFIX: &str = "🏆 ";

/// Explicit outcome of one posting pass, consumed by the scheduler loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostOutcome {
    Posted { source: String, title: String },
    Nothing,
}

pub fn compose_status(title: &str, link: &str) -> String {
    format!("{POST_PREFIX}{title}\n{link}")
}

/// Walk feed sources in declared order and post the first unseen newest
/// item. At most one post per pass: a successful post stops the scan, a
/// failed post attempt moves on to the next source. A ledger write failure
/// is the only `Err` path; it aborts the pass so the in-memory set and the
/// durable file cannot diverge silently.
pub async fn run_post_pass(
    sources: &[Box<dyn FeedSource>],
    ledger: &mut TitleLedger,
    platform: &dyn Platform,
) -> Result<PostOutcome> {
    for source in sources {
        let item = match source.newest().await {
            Ok(Some(item)) => item,
            Ok(None) => continue,
            Err(e) => {
                // One dead feed must not block the others.
                warn!(source = source.name(), error = ?e, "feed fetch failed, skipping");
                continue;
            }
        };
        if ledger.contains(&item.title) {
            continue;
        }
        let status = compose_status(&item.title, &item.link);
        match platform.post_status(&status).await {
            Ok(()) => {
                ledger.record(&item.title)?;
                info!(source = source.name(), title = %item.title, "posted headline");
                return Ok(PostOutcome::Posted {
                    source: source.name().to_string(),
                    title: item.title,
                });
            }
            Err(e) => {
                warn!(source = source.name(), error = ?e, "post attempt failed, trying next source");
            }
        }
    }
    info!("nothing to post");
    Ok(PostOutcome::Nothing)
}
