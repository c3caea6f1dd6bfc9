//! Post records held by the two persisted sets.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::PostStatus;

/// A record that deduplicates on a string key.
///
/// Persisted sets refuse a second record whose key is already present.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// A closed post under active monitoring.
///
/// Invariant: `close_date` is always present. Posts without a closure are
/// discarded before a record is ever built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedPost {
    pub url: String,
    pub close_date: DateTime<Utc>,
}

impl WatchedPost {
    pub fn new(url: impl Into<String>, close_date: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            close_date,
        }
    }

    /// How long the post has been closed as of `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.close_date
    }

    /// Is the post old enough to be re-checked?
    ///
    /// A post exactly `threshold` old is eligible; anything younger is not.
    pub fn is_aged(&self, now: DateTime<Utc>, threshold: Duration) -> bool {
        self.age(now) >= threshold
    }
}

impl Keyed for WatchedPost {
    fn key(&self) -> &str {
        &self.url
    }
}

/// A closed post that was edited after closure and awaits human review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCandidate {
    pub url: String,
    pub close_date: DateTime<Utc>,
    pub edits_since_closure: u32,
}

impl ReviewCandidate {
    /// Build a candidate from a fresh status lookup.
    ///
    /// Returns `None` unless the post is still closed and has at least one
    /// edit since closure.
    pub fn from_status(url: impl Into<String>, status: &PostStatus) -> Option<Self> {
        match status.close_date {
            Some(close_date) if status.edits_since_closure > 0 => Some(Self {
                url: url.into(),
                close_date,
                edits_since_closure: status.edits_since_closure,
            }),
            _ => None,
        }
    }
}

impl Keyed for ReviewCandidate {
    fn key(&self) -> &str {
        &self.url
    }
}
