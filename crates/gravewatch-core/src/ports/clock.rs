//! Clock port - 時刻の抽象化
//!
//! 経過時間の判定はクローズ日時と現在時刻（UTC）の比較で行う。
//! trait 経由で時刻を読むので、テストでは時刻を固定・前進できる。

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Clock は現在時刻を提供
///
/// # テスト容易性
/// - 本番では [`SystemClock`] を使用
/// - テストでは [`FixedClock`] を使用（明示的に動かしたときだけ進む）
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 実時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 指定時刻で止まった時計（`set` / `advance` でのみ動く）
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
