use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum submission fetched as a possible summarization target.
/// Immutable once fetched; `body` is empty for link posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl CandidatePost {
    /// Word count of the body, with markdown markup stripped first.
    pub fn word_count(&self) -> usize {
        crate::words::count_words(&self.body)
    }
}
