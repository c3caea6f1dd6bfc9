//! WatcherBuilder - 依存のワイヤリングと Watcher の起動
//!
//! # Fail-fast
//! StatusProvider には妥当なデフォルトがないので、未設定なら `spawn()` はエラー。
//! それ以外はデフォルトで補う：
//! - clock: `SystemClock`
//! - sets: `config.check_interval` 周期の `InMemoryPersistedSet`

use std::sync::Arc;

use super::{WatchContext, Watcher};
use crate::config::WatcherConfig;
use crate::domain::{ReviewCandidate, WatchedPost};
use crate::impls::InMemoryPersistedSet;
use crate::ports::{Clock, PersistedSet, StatusProvider, SystemClock};
use crate::queue::IngestionQueue;

/// # Example
/// ```ignore
/// let watcher = Watcher::builder()
///     .config(WatcherConfig::from_env()?)
///     .status_provider(Arc::new(MyStatusClient::new()))
///     .watched_set(watched)
///     .review_set(pending)
///     .spawn()?;
/// ```
#[derive(Default)]
pub struct WatcherBuilder {
    config: WatcherConfig,
    clock: Option<Arc<dyn Clock>>,
    status: Option<Arc<dyn StatusProvider>>,
    watched: Option<Arc<dyn PersistedSet<WatchedPost>>>,
    pending_review: Option<Arc<dyn PersistedSet<ReviewCandidate>>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no status provider configured; call `status_provider()` before `spawn()`")]
    MissingStatusProvider,
}

impl WatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn status_provider(mut self, status: Arc<dyn StatusProvider>) -> Self {
        self.status = Some(status);
        self
    }

    /// 監視リスト。この `checked` 通知が再チェックパスを駆動する。
    pub fn watched_set(mut self, set: Arc<dyn PersistedSet<WatchedPost>>) -> Self {
        self.watched = Some(set);
        self
    }

    pub fn review_set(mut self, set: Arc<dyn PersistedSet<ReviewCandidate>>) -> Self {
        self.pending_review = Some(set);
        self
    }

    pub(crate) fn build_context(self) -> Result<WatchContext, BuildError> {
        let status = self.status.ok_or(BuildError::MissingStatusProvider)?;
        let check_interval = self.config.check_interval;

        Ok(WatchContext {
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            status,
            queue: IngestionQueue::new(),
            watched: self.watched.unwrap_or_else(|| {
                Arc::new(InMemoryPersistedSet::<WatchedPost>::new(check_interval))
            }),
            pending_review: self.pending_review.unwrap_or_else(|| {
                Arc::new(InMemoryPersistedSet::<ReviewCandidate>::new(check_interval))
            }),
            config: self.config,
        })
    }

    /// ワイヤリングを検証し、両方のバックグラウンドタスクを起動する。
    ///
    /// tokio ランタイム内から呼ぶこと。
    pub fn spawn(self) -> Result<Watcher, BuildError> {
        Ok(Watcher::start(self.build_context()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::ScriptedStatusProvider;
    use std::time::Duration;

    #[test]
    fn spawn_without_status_provider_fails() {
        let result = WatcherBuilder::new().build_context();
        assert!(matches!(result, Err(BuildError::MissingStatusProvider)));
    }

    #[tokio::test]
    async fn defaults_fill_in_missing_collaborators() {
        let config = WatcherConfig {
            check_interval: Duration::from_secs(30),
            ..WatcherConfig::default()
        };
        let ctx = WatcherBuilder::new()
            .config(config.clone())
            .status_provider(Arc::new(ScriptedStatusProvider::new()))
            .build_context()
            .unwrap();

        assert_eq!(ctx.config, config);
        assert_eq!(ctx.watched.count().await.unwrap(), 0);
        assert_eq!(ctx.pending_review.count().await.unwrap(), 0);
        assert!(ctx.queue.is_empty());
    }

    #[tokio::test]
    async fn spawn_starts_a_watcher() {
        let watcher = WatcherBuilder::new()
            .status_provider(Arc::new(ScriptedStatusProvider::new()))
            .spawn()
            .unwrap();
        assert_eq!(watcher.watched_count().await.unwrap(), 0);
        watcher.shutdown_and_join().await;
    }
}
