// src/lib.rs
// Public library surface for integration tests (and the bin).

pub mod config;
pub mod engage;
pub mod feeds;
pub mod ledger;
pub mod pacing;
pub mod platform;
pub mod scheduler;
pub mod selector;

// ---- Re-exports for stable public API ----
pub use crate::config::{BotConfig, Credentials};
pub use crate::ledger::TitleLedger;
pub use crate::platform::{FoundPost, Platform};
pub use crate::scheduler::CycleReport;
