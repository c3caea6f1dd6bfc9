//! IngestLoop - 取り込みキューから監視リストへの移送
//!
//! # フロー（1 サイクル 1 URL）
//! 1. `ingest_interval` だけ sleep（shutdown で中断可）
//! 2. 先頭 URL を peek（空ならアイドルサイクル）
//! 3. `watched` か `pending_review` に既にあれば取得せずに破棄
//! 4. pop してステータス取得（取得失敗はオープン扱い）
//! 5. クローズ済み → `WatchedPost` を追加、オープン・削除済み → 破棄
//!
//! sleep は外部への取得頻度の制限であって背圧ではない（キュー自体は無制限）。

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::WatchContext;
use super::shutdown::ShutdownSignal;
use crate::domain::WatchedPost;
use crate::error::WatchError;

/// 1 サイクルの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// キューが空
    Idle,
    /// 既にレコードがあるため、取得せずに破棄
    Duplicate(String),
    /// オープン・削除済み・取得失敗（レコードは作らない）
    Discarded(String),
    /// クローズ済み（監視対象に追加）
    Watched(WatchedPost),
}

pub(crate) async fn run(ctx: Arc<WatchContext>, mut shutdown: ShutdownSignal) {
    info!(
        interval_ms = ctx.config.ingest_interval.as_millis() as u64,
        "ingestion consumer started"
    );

    loop {
        if shutdown.sleep(ctx.config.ingest_interval).await {
            break;
        }

        match ingest_one(&ctx).await {
            Ok(IngestOutcome::Idle) => {}
            Ok(outcome) => debug!(?outcome, "ingestion cycle"),
            Err(e) => warn!(error = %e, "ingestion cycle failed"),
        }
    }

    info!(queued = ctx.queue.len(), "ingestion consumer stopped");
}

/// キュー先頭に対して 1 サイクル実行する。
///
/// # Errors
/// - 存在チェックでセットが失敗した場合、URL はキューに残り次サイクルで再処理
/// - レコード追加で失敗した場合、その URL は失われる
pub(crate) async fn ingest_one(ctx: &WatchContext) -> Result<IngestOutcome, WatchError> {
    let Some(url) = ctx.queue.peek() else {
        return Ok(IngestOutcome::Idle);
    };

    // 消費者は 1 つだけなので peek と pop の間に先頭は変わらない
    if ctx.watched.contains(&url).await? || ctx.pending_review.contains(&url).await? {
        ctx.queue.pop();
        return Ok(IngestOutcome::Duplicate(url));
    }
    ctx.queue.pop();

    let close_date = match ctx.status.status(&url).await {
        Ok(status) => status.close_date,
        Err(e) => {
            debug!(%url, error = %e, "status lookup failed; treating post as open");
            None
        }
    };
    let Some(close_date) = close_date else {
        return Ok(IngestOutcome::Discarded(url));
    };

    let post = WatchedPost::new(url, close_date);
    if ctx.watched.add(post.clone()).await? {
        Ok(IngestOutcome::Watched(post))
    } else {
        Ok(IngestOutcome::Duplicate(post.url))
    }
}
