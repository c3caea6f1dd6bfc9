//! Watcher - キュー・2 つのセット・両ループをまとめる公開ハンドル

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use super::shutdown::ShutdownSignal;
use super::{WatchContext, WatcherBuilder, ingest_loop, recheck_loop};
use crate::domain::ReviewCandidate;
use crate::error::WatchError;
use crate::observability::WatcherCounts;
use crate::ports::PersistedSet;

/// 実行中の Watcher のハンドル
/// - `shutdown()` でフラグを立てると、両ループは次のチェックポイントで止まる
/// - `shutdown_and_join()` は終了まで待つので、セットは誰も使わなくなってから解放される
/// - ハンドルを drop するとフラグは立つが、終了は待てない
pub struct Watcher {
    ctx: Arc<WatchContext>,
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl Watcher {
    pub fn builder() -> WatcherBuilder {
        WatcherBuilder::new()
    }

    pub(crate) fn start(ctx: WatchContext) -> Self {
        let ctx = Arc::new(ctx);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let ingest = tokio::spawn(ingest_loop::run(
            Arc::clone(&ctx),
            ShutdownSignal::new(shutdown_rx.clone()),
        ));
        let recheck = tokio::spawn(recheck_loop::run(
            Arc::clone(&ctx),
            ShutdownSignal::new(shutdown_rx),
        ));

        Self {
            ctx,
            shutdown_tx,
            joins: vec![ingest, recheck],
        }
    }

    /// 監視対象の投稿 URL をキューに積む。
    ///
    /// # Errors
    /// 空、または空白だけの URL は `WatchError::InvalidArgument`
    pub fn submit(&self, url: impl Into<String>) -> Result<(), WatchError> {
        self.ctx.queue.submit(url)
    }

    pub async fn watched_count(&self) -> Result<usize, WatchError> {
        Ok(self.ctx.watched.count().await?)
    }

    /// レビュー待ち投稿のスナップショット
    pub async fn pending_review(&self) -> Result<Vec<ReviewCandidate>, WatchError> {
        Ok(self.ctx.pending_review.items().await?)
    }

    /// レビュー待ちセットそのもの（スナップショット以外の問い合わせ用）
    pub fn pending_review_set(&self) -> Arc<dyn PersistedSet<ReviewCandidate>> {
        Arc::clone(&self.ctx.pending_review)
    }

    pub async fn counts(&self) -> Result<WatcherCounts, WatchError> {
        Ok(WatcherCounts {
            queued: self.ctx.queue.len(),
            watched: self.ctx.watched.count().await?,
            pending_review: self.ctx.pending_review.count().await?,
        })
    }

    /// shutdown を要求する（冪等、任意のスレッドから呼べる）
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// shutdown を要求し、両ループの終了を待つ
    pub async fn shutdown_and_join(mut self) {
        self.shutdown();
        for join in self.joins.drain(..) {
            if let Err(e) = join.await {
                warn!(error = %e, "watcher task ended abnormally");
            }
        }
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
    }
}
