//! InMemoryPersistedSet - 開発用の PersistedSet 実装
//!
//! # 実装詳細
//! - `Vec<T>` で挿入順を保持し、重複はキーの線形走査で判定
//! - レコードは std `Mutex` で排他制御（await をまたいでロックしない）
//! - `checked` 通知は tokio `Interval` で駆動（ランタイム外でも作れるよう遅延生成）
//! - `Notify` で周期を待たずに通知を発火できる

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::domain::Keyed;
use crate::ports::{PersistedSet, Predicate, StoreError};

pub struct InMemoryPersistedSet<T> {
    items: Mutex<Vec<T>>,
    check_interval: Duration,
    ticker: tokio::sync::Mutex<Option<Interval>>,
    manual: Notify,
    available: AtomicBool,
}

impl<T> InMemoryPersistedSet<T> {
    /// 新しい InMemoryPersistedSet を作成（`check_interval` は `checked` 通知の周期）
    pub fn new(check_interval: Duration) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            check_interval: check_interval.max(Duration::from_millis(1)),
            ticker: tokio::sync::Mutex::new(None),
            manual: Notify::new(),
            available: AtomicBool::new(true),
        }
    }

    /// `checked` 通知を今すぐ発火する。
    ///
    /// 待っているタスクがいなければ、次の待機がすぐに完了する。
    pub fn trigger_check(&self) {
        self.manual.notify_one();
    }

    /// 障害を模擬する（unavailable の間はすべての操作が失敗）
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<T>>, StoreError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory set marked unavailable".into()));
        }
        Ok(self.items.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl<T> PersistedSet<T> for InMemoryPersistedSet<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn add(&self, item: T) -> Result<bool, StoreError> {
        let mut items = self.guard()?;
        if items.iter().any(|existing| existing.key() == item.key()) {
            return Ok(false);
        }
        items.push(item);
        Ok(true)
    }

    async fn remove_where(&self, predicate: Predicate<'_, T>) -> Result<usize, StoreError> {
        let mut items = self.guard()?;
        let before = items.len();
        items.retain(|item| !predicate(item));
        Ok(before - items.len())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.guard()?.len())
    }

    async fn items(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.guard()?.clone())
    }

    async fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.guard()?.iter().any(|item| item.key() == key))
    }

    async fn checked(&self) {
        let mut ticker = self.ticker.lock().await;
        let period = self.check_interval;
        let ticker = ticker.get_or_insert_with(|| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        tokio::select! {
            _ = ticker.tick() => {}
            _ = self.manual.notified() => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchedPost;
    use chrono::{TimeZone, Utc};

    fn post(n: u32) -> WatchedPost {
        WatchedPost::new(
            format!("https://example.com/q/{n}"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn add_deduplicates_by_key_and_keeps_order() {
        let set: InMemoryPersistedSet<WatchedPost> =
            InMemoryPersistedSet::new(Duration::from_secs(60));

        assert!(set.add(post(1)).await.unwrap());
        assert!(set.add(post(2)).await.unwrap());
        assert!(!set.add(post(1)).await.unwrap());

        let items = set.items().await.unwrap();
        assert_eq!(items, vec![post(1), post(2)]);
        assert_eq!(set.count().await.unwrap(), 2);
        assert!(set.contains("https://example.com/q/2").await.unwrap());
        assert!(!set.contains("https://example.com/q/3").await.unwrap());
    }

    #[tokio::test]
    async fn remove_where_reports_removed_count() {
        let set: InMemoryPersistedSet<WatchedPost> =
            InMemoryPersistedSet::new(Duration::from_secs(60));
        for n in 1..=4 {
            set.add(post(n)).await.unwrap();
        }

        let doomed = ["https://example.com/q/1", "https://example.com/q/3"];
        let removed = set
            .remove_where(&|p: &WatchedPost| doomed.contains(&p.url.as_str()))
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(set.items().await.unwrap(), vec![post(2), post(4)]);
    }

    #[tokio::test]
    async fn unavailable_set_fails_every_operation() {
        let set: InMemoryPersistedSet<WatchedPost> =
            InMemoryPersistedSet::new(Duration::from_secs(60));
        set.add(post(1)).await.unwrap();
        set.set_available(false);

        assert!(matches!(set.count().await, Err(StoreError::Unavailable(_))));
        assert!(set.add(post(2)).await.is_err());
        assert!(set.contains("https://example.com/q/1").await.is_err());

        set.set_available(true);
        assert_eq!(set.count().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn checked_fires_on_its_own_schedule() {
        let set: InMemoryPersistedSet<WatchedPost> =
            InMemoryPersistedSet::new(Duration::from_secs(60));

        let start = Instant::now();
        set.checked().await;
        let first = start.elapsed();
        assert!(first >= Duration::from_secs(60) && first < Duration::from_secs(61));

        set.checked().await;
        let second = start.elapsed();
        assert!(second >= Duration::from_secs(120) && second < Duration::from_secs(121));
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_check_wakes_without_waiting_for_interval() {
        let set: InMemoryPersistedSet<WatchedPost> =
            InMemoryPersistedSet::new(Duration::from_secs(3600));

        let start = Instant::now();
        set.trigger_check();
        set.checked().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
