//! Eligibility filter. Pure: no I/O, no side effects, order-preserving.

use std::collections::HashSet;

use tldrbot_common::CandidatePost;

/// Narrow candidates to posts worth summarizing: not yet processed and long
/// enough to need a TLDR. The input order (the platform's newest-first
/// listing) is preserved; link posts fall out naturally with a word count of
/// zero.
pub fn eligible_posts(
    candidates: Vec<CandidatePost>,
    processed_ids: &HashSet<String>,
    word_threshold: usize,
) -> Vec<CandidatePost> {
    candidates
        .into_iter()
        .filter(|post| {
            if processed_ids.contains(&post.id) {
                return false;
            }
            let words = post.word_count();
            if words < word_threshold {
                tracing::debug!(post_id = %post.id, words, word_threshold, "Below threshold");
                return false;
            }
            true
        })
        .collect()
}
