//! ScriptedStatusProvider - HashMap ベースの StatusProvider
//!
//! 応答は事前に（または Watcher の実行中に）登録したテーブルから返す。
//! ユニットテストとデモバイナリで使用。

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::PostStatus;
use crate::ports::{StatusError, StatusProvider};

#[derive(Default)]
struct Script {
    answers: HashMap<String, Result<PostStatus, StatusError>>,
    lookups: HashMap<String, usize>,
    delays: HashMap<String, Duration>,
}

/// 未登録の URL には [`StatusError::UnknownPost`] を返す
#[derive(Default)]
pub struct ScriptedStatusProvider {
    script: Mutex<Script>,
}

impl ScriptedStatusProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// `url` の応答を登録（上書き）
    pub fn set_status(&self, url: impl Into<String>, status: PostStatus) {
        self.lock().answers.insert(url.into(), Ok(status));
    }

    /// `url` の取得を失敗させる
    pub fn set_failure(&self, url: impl Into<String>, error: StatusError) {
        self.lock().answers.insert(url.into(), Err(error));
    }

    /// `url` の取得に毎回 `delay` だけ時間をかける
    pub fn set_delay(&self, url: impl Into<String>, delay: Duration) {
        self.lock().delays.insert(url.into(), delay);
    }

    /// `url` が取得された回数
    pub fn lookups(&self, url: &str) -> usize {
        self.lock().lookups.get(url).copied().unwrap_or(0)
    }

    pub fn total_lookups(&self) -> usize {
        self.lock().lookups.values().sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StatusProvider for ScriptedStatusProvider {
    async fn status(&self, url: &str) -> Result<PostStatus, StatusError> {
        let (answer, delay) = {
            let mut script = self.lock();
            *script.lookups.entry(url.to_string()).or_default() += 1;
            let answer = script
                .answers
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(StatusError::UnknownPost(url.to_string())));
            (answer, script.delays.get(url).copied())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        answer
    }
}
