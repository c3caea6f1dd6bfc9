//! ShutdownSignal - バックグラウンドループで共有する協調的な停止

use std::time::Duration;

use tokio::sync::watch;

/// Watcher の shutdown フラグの受信側
///
/// - sender が drop されたら shutdown 要求とみなす（閉じたチャネルで空回りしない）
#[derive(Debug, Clone)]
pub(crate) struct ShutdownSignal {
    rx: watch::Receiver<bool>,
    closed: bool,
}

impl ShutdownSignal {
    pub(crate) fn new(rx: watch::Receiver<bool>) -> Self {
        Self { rx, closed: false }
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.closed || *self.rx.borrow()
    }

    /// shutdown が要求されたら完了する。
    pub(crate) async fn requested(&mut self) {
        if self.rx.wait_for(|stop| *stop).await.is_err() {
            self.closed = true;
        }
    }

    /// `period` だけ sleep する（shutdown で早期に起きる）。
    ///
    /// shutdown が要求されていれば（sleep 前でも最中でも）`true` を返す。
    pub(crate) async fn sleep(&mut self, period: Duration) -> bool {
        if self.is_requested() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(period) => {}
            _ = self.requested() => {}
        }
        self.is_requested()
    }
}
