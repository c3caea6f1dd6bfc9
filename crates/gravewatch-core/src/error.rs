use thiserror::Error;

use crate::ports::StoreError;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    #[error("persisted set failure: {0}")]
    Store(#[from] StoreError),

    #[error("failed to initialise tracing: {0}")]
    Tracing(String),
}
