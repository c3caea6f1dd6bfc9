//! gravewatch-core
//!
//! クローズされた投稿を監視し、クローズ後に編集されたもの（人手レビューが必要）と
//! 再オープン・削除されたもの（監視不要）を振り分ける。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（投稿レコード、ステータス）
//! - **ports**: 抽象化レイヤー（StatusProvider, PersistedSet, Clock）
//! - **impls**: 実装（InMemoryPersistedSet など開発・テスト用）
//! - **queue**: 投入された URL の取り込みキュー
//! - **app**: Watcher 本体（builder, ingest_loop, recheck_loop）
//! - **config**: 周期・閾値の設定（環境変数で上書き可）
//! - **observability**: 件数ビューと tracing の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod queue;

pub use app::{BuildError, Watcher, WatcherBuilder};
pub use config::{ConfigError, WatcherConfig};
pub use error::WatchError;
