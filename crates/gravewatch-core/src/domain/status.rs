//! PostStatus - 外部ステータス取得元が返す投稿の状態

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 投稿の現在の状態
///
/// - `close_date == None`: オープン中、または削除済み
/// - `close_date == Some(_)`: クローズ済み。`edits_since_closure` はクローズ後の編集回数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStatus {
    pub close_date: Option<DateTime<Utc>>,
    pub edits_since_closure: u32,
}

impl PostStatus {
    pub fn open() -> Self {
        Self {
            close_date: None,
            edits_since_closure: 0,
        }
    }

    pub fn closed(close_date: DateTime<Utc>, edits_since_closure: u32) -> Self {
        Self {
            close_date: Some(close_date),
            edits_since_closure,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.close_date.is_some()
    }
}
