//! Run-cycle controller for the TLDR bot.
//!
//! One invocation is one cycle: fetch recent posts, filter to eligible ones,
//! summarize and comment up to the per-cycle cap, persist progress post by
//! post, then fold the cycle's counters into cumulative statistics.

pub mod cycle;
pub mod dashboard;
pub mod filter;
pub mod traits;

pub use cycle::{CycleConfig, CycleRunner, CycleStats};
pub use traits::{CommentPublisher, ForumReader, RedditForum, Summarizer};
