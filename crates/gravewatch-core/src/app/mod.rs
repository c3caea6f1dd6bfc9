//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて 2 つのバックグラウンド処理を実装します。
//!
//! # 主要コンポーネント
//! - **WatcherBuilder**: ワイヤリングと fail-fast な検証
//! - **Watcher**: 公開ハンドル（submit, counts, shutdown）
//! - **ingest_loop**: キュー → ステータス取得 → 監視リスト
//! - **recheck_loop**: 監視リストの `checked` → 再チェックパス → レビュー待ちリスト
//! - **shutdown**: 両ループで共有する協調的な停止

pub mod builder;
pub mod ingest_loop;
pub mod recheck_loop;
pub(crate) mod shutdown;
pub mod watcher;

use std::sync::Arc;

use crate::config::WatcherConfig;
use crate::domain::{ReviewCandidate, WatchedPost};
use crate::ports::{Clock, PersistedSet, StatusProvider};
use crate::queue::IngestionQueue;

pub use self::builder::{BuildError, WatcherBuilder};
pub use self::ingest_loop::IngestOutcome;
pub use self::recheck_loop::{RecheckOutcome, RecheckReport};
pub use self::watcher::Watcher;

/// 両ループが共有する依存一式（構築後は `Arc` 越しに読むだけ）
pub(crate) struct WatchContext {
    pub(crate) config: WatcherConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) status: Arc<dyn StatusProvider>,
    pub(crate) queue: IngestionQueue,
    pub(crate) watched: Arc<dyn PersistedSet<WatchedPost>>,
    pub(crate) pending_review: Arc<dyn PersistedSet<ReviewCandidate>>,
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{DateTime, TimeZone, Utc};

    use super::WatchContext;
    use crate::config::WatcherConfig;
    use crate::domain::{ReviewCandidate, WatchedPost};
    use crate::impls::{InMemoryPersistedSet, ScriptedStatusProvider};
    use crate::ports::FixedClock;
    use crate::queue::IngestionQueue;

    /// Closure instant used across the tests.
    pub(crate) fn closed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    pub(crate) struct Fixture {
        pub(crate) clock: Arc<FixedClock>,
        pub(crate) status: Arc<ScriptedStatusProvider>,
        pub(crate) watched: Arc<InMemoryPersistedSet<WatchedPost>>,
        pub(crate) pending_review: Arc<InMemoryPersistedSet<ReviewCandidate>>,
    }

    impl Fixture {
        /// 時計は [`closed_at`] から開始。セットは手動発火しない限り 1 時間周期。
        pub(crate) fn new() -> Self {
            Self {
                clock: Arc::new(FixedClock::new(closed_at())),
                status: Arc::new(ScriptedStatusProvider::new()),
                watched: Arc::new(InMemoryPersistedSet::new(Duration::from_secs(3600))),
                pending_review: Arc::new(InMemoryPersistedSet::new(Duration::from_secs(3600))),
            }
        }

        pub(crate) fn context(&self) -> WatchContext {
            WatchContext {
                config: WatcherConfig::default(),
                clock: self.clock.clone(),
                status: self.status.clone(),
                queue: IngestionQueue::new(),
                watched: self.watched.clone(),
                pending_review: self.pending_review.clone(),
            }
        }
    }
}
