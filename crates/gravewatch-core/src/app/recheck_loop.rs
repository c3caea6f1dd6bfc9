//! RecheckLoop - 経過した監視投稿の昇格・除外
//!
//! 監視リストの `checked` 通知ごとに 1 パス実行する。
//! パスはこのタスク上で順に実行され、重ならない。
//!
//! # パス
//! 1. 監視リストのスナップショットを取る
//! 2. 各投稿について（挿入順）：
//!    - `aging_threshold` 未満 → スキップ
//!    - `recheck_pacing` だけ sleep（shutdown なら中断）
//!    - ステータス取得（取得中に shutdown なら中断）
//!    - クローズ済みかつ編集あり → `ReviewCandidate` を追加し、削除対象に
//!    - オープン・削除済み・取得失敗 → 削除対象に
//!    - クローズ済みで編集なし → 残す
//! 3. 削除対象を一括で削除
//!
//! 削除は全件走査の後にだけ適用する。中断されたパスは監視リストを変更しない。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::WatchContext;
use super::shutdown::ShutdownSignal;
use crate::domain::{ReviewCandidate, WatchedPost};
use crate::error::WatchError;

/// 完了したパスの集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecheckReport {
    pub examined: usize,
    pub too_young: usize,
    pub promoted: usize,
    pub dropped: usize,
    pub retained: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecheckOutcome {
    Completed(RecheckReport),
    /// 走査中に shutdown（決定済みの `decided` 件の削除は破棄）
    Aborted { decided: usize },
}

pub(crate) async fn run(ctx: Arc<WatchContext>, mut shutdown: ShutdownSignal) {
    info!(
        pacing_ms = ctx.config.recheck_pacing.as_millis() as u64,
        aging_threshold_secs = ctx.config.aging_threshold.num_seconds(),
        "re-check loop started"
    );

    loop {
        tokio::select! {
            biased;
            _ = shutdown.requested() => break,
            _ = ctx.watched.checked() => {}
        }

        match recheck_pass(&ctx, &mut shutdown).await {
            Ok(RecheckOutcome::Completed(report)) => info!(
                examined = report.examined,
                too_young = report.too_young,
                promoted = report.promoted,
                dropped = report.dropped,
                retained = report.retained,
                "re-check pass completed"
            ),
            Ok(RecheckOutcome::Aborted { decided }) => {
                info!(decided, "re-check pass aborted; no removals applied");
                break;
            }
            Err(e) => warn!(error = %e, "re-check pass failed"),
        }
    }

    info!("re-check loop stopped");
}

pub(crate) async fn recheck_pass(
    ctx: &WatchContext,
    shutdown: &mut ShutdownSignal,
) -> Result<RecheckOutcome, WatchError> {
    let mut report = RecheckReport::default();
    let mut to_remove: HashSet<String> = HashSet::new();

    for post in ctx.watched.items().await? {
        report.examined += 1;

        if !post.is_aged(ctx.clock.now(), ctx.config.aging_threshold) {
            report.too_young += 1;
            continue;
        }

        if shutdown.sleep(ctx.config.recheck_pacing).await {
            return Ok(RecheckOutcome::Aborted {
                decided: to_remove.len(),
            });
        }

        let status = match ctx.status.status(&post.url).await {
            Ok(status) => Some(status),
            Err(e) => {
                debug!(url = %post.url, error = %e, "status lookup failed; treating post as open");
                None
            }
        };

        if shutdown.is_requested() {
            return Ok(RecheckOutcome::Aborted {
                decided: to_remove.len(),
            });
        }

        match status {
            Some(status) if status.is_closed() => {
                let Some(candidate) = ReviewCandidate::from_status(&post.url, &status) else {
                    report.retained += 1;
                    continue;
                };
                match ctx.pending_review.add(candidate).await {
                    Ok(_) => {
                        debug!(url = %post.url, edits = status.edits_since_closure, "promoted to review");
                        report.promoted += 1;
                        to_remove.insert(post.url);
                    }
                    Err(e) => {
                        // 監視リストに残す（次のパスで再度昇格を試みる）
                        warn!(url = %post.url, error = %e, "failed to record review candidate");
                        report.retained += 1;
                    }
                }
            }
            _ => {
                debug!(url = %post.url, "reopened or deleted; no longer watched");
                report.dropped += 1;
                to_remove.insert(post.url);
            }
        }
    }

    if !to_remove.is_empty() {
        ctx.watched
            .remove_where(&|post: &WatchedPost| to_remove.contains(&post.url))
            .await?;
    }

    Ok(RecheckOutcome::Completed(report))
}
