//! Seams between the controller and its collaborators.
//!
//! Production code wires these to the Reddit and Gemini clients; tests supply
//! in-memory fakes that record calls.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gemini_client::{GeminiClient, GeminiError, Summary};
use reddit_client::{RedditClient, RedditError, Submission};
use tldrbot_common::{words, CandidatePost};

/// Read side of the forum.
#[async_trait]
pub trait ForumReader: Send + Sync {
    async fn recent_posts(&self, limit: u32) -> Result<Vec<CandidatePost>, RedditError>;
}

/// Write side of the forum: comment, then pin.
#[async_trait]
pub trait CommentPublisher: Send + Sync {
    async fn post_comment(&self, post_id: &str, body: &str) -> Result<String, RedditError>;
    async fn pin_comment(&self, comment_id: &str) -> Result<(), RedditError>;
}

/// Summary generation for one candidate post.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, post: &CandidatePost) -> Result<Summary, GeminiError>;
}

// ---------------------------------------------------------------------------
// Live implementations
// ---------------------------------------------------------------------------

/// Forum access backed by the Reddit API, scoped to one subreddit.
pub struct RedditForum {
    client: RedditClient,
    subreddit: String,
}

impl RedditForum {
    pub fn new(client: RedditClient, subreddit: impl Into<String>) -> Self {
        Self {
            client,
            subreddit: subreddit.into(),
        }
    }
}

#[async_trait]
impl ForumReader for RedditForum {
    async fn recent_posts(&self, limit: u32) -> Result<Vec<CandidatePost>, RedditError> {
        let submissions = self.client.recent_posts(&self.subreddit, limit).await?;
        Ok(submissions.into_iter().map(candidate_from_submission).collect())
    }
}

#[async_trait]
impl CommentPublisher for RedditForum {
    async fn post_comment(&self, post_id: &str, body: &str) -> Result<String, RedditError> {
        self.client.post_comment(post_id, body).await
    }

    async fn pin_comment(&self, comment_id: &str) -> Result<(), RedditError> {
        self.client.pin_comment(comment_id).await
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, post: &CandidatePost) -> Result<Summary, GeminiError> {
        let target = words::target_summary_words(post.word_count());
        GeminiClient::summarize(self, &post.title, &post.body, target).await
    }
}

fn candidate_from_submission(s: Submission) -> CandidatePost {
    let created_at: DateTime<Utc> =
        DateTime::from_timestamp(s.created_utc as i64, 0).unwrap_or_else(Utc::now);
    CandidatePost {
        id: s.id,
        title: s.title,
        body: s.selftext,
        author: s.author,
        created_at,
    }
}

// ---------------------------------------------------------------------------
// Arc blankets — let one collaborator be shared as reader and publisher
// ---------------------------------------------------------------------------

#[async_trait]
impl<T: ForumReader + ?Sized> ForumReader for Arc<T> {
    async fn recent_posts(&self, limit: u32) -> Result<Vec<CandidatePost>, RedditError> {
        (**self).recent_posts(limit).await
    }
}

#[async_trait]
impl<T: CommentPublisher + ?Sized> CommentPublisher for Arc<T> {
    async fn post_comment(&self, post_id: &str, body: &str) -> Result<String, RedditError> {
        (**self).post_comment(post_id, body).await
    }

    async fn pin_comment(&self, comment_id: &str) -> Result<(), RedditError> {
        (**self).pin_comment(comment_id).await
    }
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Arc<T> {
    async fn summarize(&self, post: &CandidatePost) -> Result<Summary, GeminiError> {
        (**self).summarize(post).await
    }
}
