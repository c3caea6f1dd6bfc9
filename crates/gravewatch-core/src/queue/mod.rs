//! Ingestion queue: unbounded FIFO of submitted post URLs.
//!
//! Design:
//! - producers call `submit` from any thread, never blocking on the consumer
//! - exactly one consumer (the ingestion loop) uses `peek` / `pop`
//! - no dedupe here; duplicates are filtered against the persisted sets

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::WatchError;

#[derive(Debug, Default)]
pub struct IngestionQueue {
    urls: Mutex<VecDeque<String>>,
}

impl IngestionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `url` at the tail.
    ///
    /// # Errors
    /// `WatchError::InvalidArgument` if `url` is empty or only whitespace.
    pub fn submit(&self, url: impl Into<String>) -> Result<(), WatchError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(WatchError::InvalidArgument {
                name: "url",
                reason: "must not be empty or entirely whitespace",
            });
        }
        self.lock().push_back(url);
        Ok(())
    }

    /// Clone of the head entry without removing it.
    pub fn peek(&self) -> Option<String> {
        self.lock().front().cloned()
    }

    pub fn pop(&self) -> Option<String> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
