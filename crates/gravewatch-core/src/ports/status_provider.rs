//! StatusProvider port - 投稿のクローズ状態の取得
//!
//! 取得方法（HTTP、スクレイピング、API など）はこのクレートの関心外。
//! Watcher が依存するのは [`PostStatus`] の形だけ。

use async_trait::async_trait;

use crate::domain::PostStatus;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("status source unavailable: {0}")]
    Unavailable(String),

    #[error("unknown post: {0}")]
    UnknownPost(String),
}

/// StatusProvider は投稿の現在のステータスを返す
///
/// # 失敗時の扱い
/// - 呼び出し側はすべての `Err` を「クローズ日時なし」として扱う
/// - 実装側で内部リトライはしない（Watcher もリトライしない）
#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn status(&self, url: &str) -> Result<PostStatus, StatusError>;
}
