//! Ports - 抽象化レイヤー
//!
//! Watcher が所有しない外部要素との境界を trait で定義します。
//!
//! # 主要コンポーネント
//! - **StatusProvider**: 投稿ステータスの取得
//! - **PersistedSet**: 永続化される重複なしコレクション
//! - **Clock**: 現在時刻
//!
//! 本番の実装は組み込み側が用意する。開発・テスト用の実装は `impls` にある。

pub mod clock;
pub mod persisted_set;
pub mod status_provider;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::persisted_set::{PersistedSet, Predicate, StoreError};
pub use self::status_provider::{StatusError, StatusProvider};
