//! PersistedSet port - 永続化・重複排除・挿入順保持のコレクション
//!
//! Watcher は監視リストとレビュー待ちリストをこれで保持する。
//! ファイル形式や永続化の方法は実装側の責務。
//!
//! # 契約
//! - `add` は同じキーのレコードがなければ末尾に追加
//! - `items` は挿入順のスナップショットを返す
//! - すべてのメソッドは複数タスクから同時に呼んでよい
//! - `checked` は実装側の周期で完了する

use async_trait::async_trait;

use crate::domain::Keyed;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("persisted set unavailable: {0}")]
    Unavailable(String),

    #[error("persisted set write failed: {0}")]
    WriteFailed(String),
}

/// [`PersistedSet::remove_where`] に渡す条件
pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

#[async_trait]
pub trait PersistedSet<T>: Send + Sync
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    /// レコードを追加する。同じキーが既にあれば何も書かずに `false` を返す。
    async fn add(&self, item: T) -> Result<bool, StoreError>;

    /// `predicate` に一致するレコードをすべて削除し、削除件数を返す。
    async fn remove_where(&self, predicate: Predicate<'_, T>) -> Result<usize, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;

    /// 全レコードのスナップショット（挿入順）
    async fn items(&self) -> Result<Vec<T>, StoreError>;

    async fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.items().await?.iter().any(|item| item.key() == key))
    }

    /// 次の周期的な「checked」通知を待つ。
    ///
    /// 待つのはセットの所有者のみ（単一タスクから）。
    async fn checked(&self);
}
