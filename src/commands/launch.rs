//! Launch command
//!
//! Holds the launch screen for the configured delay, then opens the key
//! ring so the first screen renders from loaded data.

use serde::Serialize;
use tokio::time::{sleep, Duration};
use tracing::instrument;

use crate::SharedState;

#[derive(Debug, Serialize)]
pub struct LaunchResponse {
    pub ready: bool,
    pub record_count: usize,
    pub error: Option<String>,
}

/// Waits out the launch delay; not cancellable once started
#[instrument(skip(state))]
pub async fn launch(state: &SharedState) -> LaunchResponse {
    let delay_ms = state.lock().await.config.launch_delay_ms;
    sleep(Duration::from_millis(delay_ms)).await;

    let mut state = state.lock().await;
    match state.record_store() {
        Ok(store) => LaunchResponse {
            ready: true,
            record_count: store.len(),
            error: None,
        },
        Err(e) => LaunchResponse {
            ready: false,
            record_count: 0,
            error: Some(e.to_string()),
        },
    }
}
