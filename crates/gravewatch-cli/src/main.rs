use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use tokio::time::sleep;
use tracing::info;

use gravewatch_core::domain::{PostStatus, ReviewCandidate, WatchedPost};
use gravewatch_core::impls::{InMemoryPersistedSet, ScriptedStatusProvider};
use gravewatch_core::observability::init_tracing;
use gravewatch_core::ports::FixedClock;
use gravewatch_core::{Watcher, WatcherConfig};

const EDITED: &str = "https://example.com/q/1";
const REOPENED: &str = "https://example.com/q/2";
const NEVER_CLOSED: &str = "https://example.com/q/3";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = WatcherConfig::from_env()?;
    init_tracing(&config.log_level)?;

    // (A) スクリプト化したステータス取得元と、手で進められる時計を用意
    let closed_at = Utc::now() - TimeDelta::hours(1);
    let clock = Arc::new(FixedClock::new(Utc::now()));
    let status = Arc::new(ScriptedStatusProvider::new());
    status.set_status(EDITED, PostStatus::closed(closed_at, 0));
    status.set_status(REOPENED, PostStatus::closed(closed_at, 0));
    status.set_status(NEVER_CLOSED, PostStatus::open());

    let watched: Arc<InMemoryPersistedSet<WatchedPost>> =
        Arc::new(InMemoryPersistedSet::new(config.check_interval));
    let pending: Arc<InMemoryPersistedSet<ReviewCandidate>> =
        Arc::new(InMemoryPersistedSet::new(config.check_interval));

    // (B) Watcher を起動
    let ingest_interval = config.ingest_interval;
    let recheck_pacing = config.recheck_pacing;
    let aging_threshold = config.aging_threshold;
    let watcher = Watcher::builder()
        .config(config)
        .clock(clock.clone())
        .status_provider(status.clone())
        .watched_set(watched.clone())
        .review_set(pending.clone())
        .spawn()?;

    // (C) 投稿を投入し、取り込みで捌かせる
    for url in [EDITED, REOPENED, NEVER_CLOSED] {
        watcher.submit(url)?;
    }
    sleep(ingest_interval * 4).await;
    info!(counts = ?watcher.counts().await?, "after ingestion");

    // (D) 閾値を超えるまで時計を進め、ステータスを変えてチェックを強制発火
    clock.advance(aging_threshold + TimeDelta::hours(6));
    status.set_status(EDITED, PostStatus::closed(closed_at, 3));
    status.set_status(REOPENED, PostStatus::open());
    watched.trigger_check();
    sleep(recheck_pacing * 3 + Duration::from_millis(500)).await;
    info!(counts = ?watcher.counts().await?, "after re-check");

    for candidate in watcher.pending_review().await? {
        println!("{}", serde_json::to_string(&candidate)?);
    }

    // (E) 明示的に停止（セットを手放す前にループを join する）
    watcher.shutdown_and_join().await;
    Ok(())
}
