// src/pacing.rs
use std::time::Duration;

/// Injectable sleep dependency. Production pauses go through the tokio
/// timer; tests substitute a recorder and simulate many cycles without
/// wall-clock delay.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, d: Duration);
}

pub struct TokioPacer;

#[async_trait::async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, d: Duration) {
        tokio::time::sleep(d).await;
    }
}
