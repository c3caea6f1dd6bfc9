use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

use crate::error::WatchError;

/// Snapshot of where posts currently sit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherCounts {
    pub queued: usize,
    pub watched: usize,
    pub pending_review: usize,
}

/// Install a fmt subscriber filtered by `RUST_LOG`, or `fallback` when unset.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(fallback: &str) -> Result<(), WatchError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .map_err(|e| WatchError::Tracing(e.to_string()))
}
