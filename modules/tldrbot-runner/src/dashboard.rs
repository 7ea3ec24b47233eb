//! Snapshot feed for the external static dashboard.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use tldrbot_state::store::write_json_atomic;
use tldrbot_state::RunStats;

/// Shape consumed by the dashboard renderer. Field names are part of the
/// published contract; do not rename.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub total_tldrs: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub runs: u64,
    pub failures: u64,
    pub pin_failures: u64,
    pub last_run: Option<DateTime<Utc>>,
}

impl From<&RunStats> for DashboardSnapshot {
    fn from(stats: &RunStats) -> Self {
        Self {
            total_tldrs: stats.tldrs_posted,
            total_tokens: stats.tokens_used,
            total_cost: stats.cost_usd,
            runs: stats.runs,
            failures: stats.failures,
            pin_failures: stats.pin_failures,
            last_run: stats.last_run,
        }
    }
}

/// Atomically refresh the dashboard feed from the cumulative stats.
pub fn write_snapshot(path: &Path, stats: &RunStats) -> Result<()> {
    write_json_atomic(path, &DashboardSnapshot::from(stats))
}
