use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a processed post ended up. Only successful publishes produce a record;
/// failed posts carry no record so they stay eligible for a later cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// TLDR comment posted and pinned.
    Published,
    /// Comment posted but pinning failed. Pinning is never retried against a
    /// possibly-already-pinned comment.
    PublishedUnpinned,
}

/// Record written the moment a post's TLDR comment lands. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub post_id: String,
    pub processed_at: DateTime<Utc>,
    pub outcome: Outcome,
}

/// Cumulative counters surfaced on the dashboard. Accumulate only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub runs: u64,
    pub posts_scanned: u64,
    pub tldrs_posted: u64,
    pub failures: u64,
    pub pin_failures: u64,
    pub tokens_used: u64,
    pub cost_usd: f64,
    pub last_run: Option<DateTime<Utc>>,
}

/// Keep only this many processed records so the state file stays bounded.
/// Anything older has long scrolled out of the fetch window anyway.
pub const PROCESSED_CAP: usize = 1000;

/// Everything the bot remembers between invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotState {
    pub last_check: Option<DateTime<Utc>>,
    pub processed: BTreeMap<String, ProcessedRecord>,
    pub stats: RunStats,
}

impl BotState {
    pub fn is_processed(&self, post_id: &str) -> bool {
        self.processed.contains_key(post_id)
    }

    /// Insert a record. First write wins: a post already marked processed is
    /// never overwritten, even by an overlapping invocation.
    pub fn mark_processed(&mut self, record: ProcessedRecord) {
        self.processed
            .entry(record.post_id.clone())
            .or_insert(record);
        self.trim_processed();
    }

    fn trim_processed(&mut self) {
        if self.processed.len() <= PROCESSED_CAP {
            return;
        }
        let mut by_age: Vec<(DateTime<Utc>, String)> = self
            .processed
            .values()
            .map(|r| (r.processed_at, r.post_id.clone()))
            .collect();
        by_age.sort();
        let excess = self.processed.len() - PROCESSED_CAP;
        for (_, id) in by_age.into_iter().take(excess) {
            self.processed.remove(&id);
        }
    }
}
