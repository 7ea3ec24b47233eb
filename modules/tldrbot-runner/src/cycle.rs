//! The run cycle: Fetching → Filtering → Dispatching → Finalizing.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info, warn};

use gemini_client::{GeminiError, Summary};
use reddit_client::RedditError;
use tldrbot_common::CandidatePost;
use tldrbot_state::{BotState, Outcome, ProcessedRecord, StateStore};

use crate::filter;
use crate::traits::{CommentPublisher, ForumReader, Summarizer};

/// First-ever run looks at a small window; later runs a larger one so nothing
/// slips between invocations.
const FIRST_RUN_FETCH_LIMIT: u32 = 10;
const FETCH_LIMIT: u32 = 50;

/// Per-cycle knobs, resolved and validated at startup.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub word_threshold: usize,
    pub max_tldr_per_run: usize,
    pub dry_run: bool,
}

/// Counters for one cycle. Folded into the cumulative `RunStats` at
/// Finalizing.
#[derive(Debug, Default)]
pub struct CycleStats {
    pub posts_scanned: u32,
    pub eligible: u32,
    pub tldrs_posted: u32,
    pub failures: u32,
    pub pin_failures: u32,
    pub tokens_used: u64,
    pub cost_usd: f64,
    /// Why dispatching stopped early, if it did.
    pub aborted: Option<String>,
}

impl std::fmt::Display for CycleStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== TLDR Cycle Complete ===")?;
        writeln!(f, "Posts scanned:  {}", self.posts_scanned)?;
        writeln!(f, "Eligible:       {}", self.eligible)?;
        writeln!(f, "TLDRs posted:   {}", self.tldrs_posted)?;
        writeln!(f, "Failures:       {}", self.failures)?;
        writeln!(f, "Pin failures:   {}", self.pin_failures)?;
        writeln!(f, "Tokens used:    {}", self.tokens_used)?;
        writeln!(f, "Estimated cost: ${:.6}", self.cost_usd)?;
        if let Some(reason) = &self.aborted {
            writeln!(f, "Aborted early:  {reason}")?;
        }
        Ok(())
    }
}

/// Failures that end dispatching for the rest of the cycle. Everything else
/// is counted against the one post and skipped.
#[derive(Debug, thiserror::Error)]
enum CycleAbort {
    #[error("rate limited")]
    RateLimited,
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("state store unwritable: {0}")]
    PersistFailed(String),
}

pub struct CycleRunner<R, S, P, St> {
    reader: R,
    summarizer: S,
    publisher: P,
    store: St,
    config: CycleConfig,
}

impl<R, S, P, St> CycleRunner<R, S, P, St>
where
    R: ForumReader,
    S: Summarizer,
    P: CommentPublisher,
    St: StateStore,
{
    pub fn new(reader: R, summarizer: S, publisher: P, store: St, config: CycleConfig) -> Self {
        Self {
            reader,
            summarizer,
            publisher,
            store,
            config,
        }
    }

    /// Run one full cycle. Returns Err only when fetching fails, before any
    /// state has been touched; every later failure is absorbed into the
    /// cycle's statistics so the state store always gets persisted with
    /// whatever progress was made.
    pub async fn run(&self) -> Result<CycleStats> {
        let run_id = uuid::Uuid::new_v4();
        info!(run_id = %run_id, dry_run = self.config.dry_run, "Cycle starting");

        let mut state = self.store.load().context("Failed to load state")?;
        let mut stats = CycleStats::default();

        // Fetching. A failure here is a safe no-op: nothing has been mutated.
        let limit = if state.last_check.is_none() {
            FIRST_RUN_FETCH_LIMIT
        } else {
            FETCH_LIMIT
        };
        let candidates = self
            .reader
            .recent_posts(limit)
            .await
            .context("Failed to fetch recent posts")?;
        stats.posts_scanned = candidates.len() as u32;
        info!(count = candidates.len(), limit, "Fetched candidate posts");

        // Filtering.
        let processed_ids: HashSet<String> = state.processed.keys().cloned().collect();
        let eligible = filter::eligible_posts(candidates, &processed_ids, self.config.word_threshold);
        stats.eligible = eligible.len() as u32;

        // Dispatching: cap first, preserving the listing order, then strictly
        // sequential.
        let batch: Vec<CandidatePost> = eligible
            .into_iter()
            .take(self.config.max_tldr_per_run)
            .collect();
        info!(
            batch = batch.len(),
            cap = self.config.max_tldr_per_run,
            "Dispatching"
        );

        for post in &batch {
            if self.config.dry_run {
                info!(
                    post_id = %post.id,
                    words = post.word_count(),
                    title = %post.title,
                    "[dry-run] Would summarize and comment"
                );
                continue;
            }
            if let Err(abort) = self.process_post(post, &mut state, &mut stats).await {
                warn!(post_id = %post.id, reason = %abort, "Aborting remaining dispatch");
                stats.aborted = Some(abort.to_string());
                break;
            }
        }

        // Finalizing.
        if self.config.dry_run {
            info!("[dry-run] Skipping state save");
            return Ok(stats);
        }

        state.stats.runs += 1;
        state.stats.posts_scanned += stats.posts_scanned as u64;
        state.stats.tldrs_posted += stats.tldrs_posted as u64;
        state.stats.failures += stats.failures as u64;
        state.stats.pin_failures += stats.pin_failures as u64;
        state.stats.tokens_used += stats.tokens_used;
        state.stats.cost_usd += stats.cost_usd;
        let now = Utc::now();
        state.stats.last_run = Some(now);
        state.last_check = Some(now);
        self.store.save(&state).context("Failed to persist state")?;

        info!(run_id = %run_id, tldrs = stats.tldrs_posted, "Cycle finished");
        Ok(stats)
    }

    /// Summarize, comment, pin, and persist one post. An Err return stops the
    /// rest of this cycle's dispatch; the post itself may still have been
    /// marked processed (pin failures after a successful comment).
    async fn process_post(
        &self,
        post: &CandidatePost,
        state: &mut BotState,
        stats: &mut CycleStats,
    ) -> std::result::Result<(), CycleAbort> {
        info!(post_id = %post.id, words = post.word_count(), title = %post.title, "Summarizing");

        let summary = match self.summarize_with_retry(post).await {
            Ok(summary) => summary,
            Err(GeminiError::RateLimited) => {
                stats.failures += 1;
                return Err(CycleAbort::RateLimited);
            }
            Err(e) => {
                // No record written: the post stays eligible and a later
                // cycle regenerates the summary from scratch.
                warn!(post_id = %post.id, error = %e, "Summarization failed, skipping post");
                stats.failures += 1;
                return Ok(());
            }
        };
        stats.tokens_used += summary.usage.total();
        stats.cost_usd += summary.usage.cost_usd;

        let comment_body = format!("**TLDR:** {}", summary.text);
        let comment_id = match self.publish_with_retry(&post.id, &comment_body).await {
            Ok(id) => id,
            Err(RedditError::RateLimited) => {
                stats.failures += 1;
                return Err(CycleAbort::RateLimited);
            }
            Err(RedditError::PermissionDenied { status, message }) => {
                stats.failures += 1;
                return Err(CycleAbort::PermissionDenied(format!(
                    "status {status}: {message}"
                )));
            }
            Err(e) => {
                warn!(post_id = %post.id, error = %e, "Comment failed, skipping post");
                stats.failures += 1;
                return Ok(());
            }
        };

        // Pin exactly once. A failed pin is a partial success: the TLDR is
        // visible, just not sticky, and re-pinning blindly is not
        // idempotent-safe against a possibly-already-pinned comment.
        let (outcome, pin_abort) = match self.publisher.pin_comment(&comment_id).await {
            Ok(()) => (Outcome::Published, None),
            Err(e) => {
                warn!(
                    post_id = %post.id,
                    comment_id = %comment_id,
                    error = %e,
                    "Pin failed, leaving comment unpinned"
                );
                stats.pin_failures += 1;
                let abort = match e {
                    RedditError::RateLimited => Some(CycleAbort::RateLimited),
                    RedditError::PermissionDenied { status, message } => Some(
                        CycleAbort::PermissionDenied(format!("status {status}: {message}")),
                    ),
                    _ => None,
                };
                (Outcome::PublishedUnpinned, abort)
            }
        };

        state.mark_processed(ProcessedRecord {
            post_id: post.id.clone(),
            processed_at: Utc::now(),
            outcome,
        });
        stats.tldrs_posted += 1;
        info!(post_id = %post.id, comment_id = %comment_id, "TLDR posted");

        // Durable before the next post, so a crash mid-cycle cannot lead to a
        // duplicate comment for anything already published. If the record
        // cannot be persisted, publishing more comments would leave every one
        // of them eligible for republication next cycle; stop here instead.
        if let Err(e) = self.store.save(state) {
            error!(post_id = %post.id, error = %e, "Failed to persist state after publish");
            return Err(CycleAbort::PersistFailed(e.to_string()));
        }

        pin_abort.map_or(Ok(()), Err)
    }

    async fn summarize_with_retry(&self, post: &CandidatePost) -> Result<Summary, GeminiError> {
        match self.summarizer.summarize(post).await {
            Err(e) if e.is_transient() => {
                warn!(post_id = %post.id, error = %e, "Transient summarization error, retrying once");
                self.summarizer.summarize(post).await
            }
            other => other,
        }
    }

    async fn publish_with_retry(&self, post_id: &str, body: &str) -> Result<String, RedditError> {
        match self.publisher.post_comment(post_id, body).await {
            Err(e) if e.is_transient() => {
                warn!(post_id, error = %e, "Transient comment error, retrying once");
                self.publisher.post_comment(post_id, body).await
            }
            other => other,
        }
    }
}
