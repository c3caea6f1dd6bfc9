//! Domain - ドメインモデル（投稿レコード、ステータス）

pub mod post;
pub mod status;

pub use post::{Keyed, ReviewCandidate, WatchedPost};
pub use status::PostStatus;
