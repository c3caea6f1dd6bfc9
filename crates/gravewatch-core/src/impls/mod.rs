//! Impls - ports の実装（開発・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryPersistedSet**: 挿入順を保持する重複なしセット（周期的な `checked` 付き）
//! - **ScriptedStatusProvider**: テーブル駆動のステータス応答
//!
//! ファイル永続化のセットや実際のステータス取得クライアントは、
//! Watcher を組み込むプロセス側に置く。

pub mod inmem_set;
pub mod scripted_status;

pub use self::inmem_set::InMemoryPersistedSet;
pub use self::scripted_status::ScriptedStatusProvider;
