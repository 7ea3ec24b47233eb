pub mod error;
pub mod types;

pub use error::{RedditError, Result};
pub use types::Submission;

use std::time::Duration;

use types::{CommentResponse, Listing, TokenResponse};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const OAUTH_BASE: &str = "https://oauth.reddit.com";
const USER_AGENT: &str = "tldr-bot/0.1 (moderator TLDR bot)";

/// Script-app credentials for a moderator bot account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

pub struct RedditClient {
    client: reqwest::Client,
    token: String,
}

impl RedditClient {
    /// Authenticate with the OAuth2 password grant (script apps only).
    pub async fn login(creds: &Credentials) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        let params = [
            ("grant_type", "password"),
            ("username", creds.username.as_str()),
            ("password", creds.password.as_str()),
        ];
        let resp = client
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RedditError::from_status(status.as_u16(), message));
        }

        let token: TokenResponse = resp.json().await?;
        tracing::info!(username = %creds.username, "Authenticated with Reddit");
        Ok(Self {
            client,
            token: token.access_token,
        })
    }

    /// Fetch the newest submissions in a subreddit, newest first.
    pub async fn recent_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Submission>> {
        let url = format!("{OAUTH_BASE}/r/{subreddit}/new?limit={limit}&raw_json=1");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RedditError::from_status(status.as_u16(), message));
        }

        let listing: Listing = resp.json().await?;
        let posts: Vec<Submission> = listing.data.children.into_iter().map(|t| t.data).collect();
        tracing::debug!(subreddit, count = posts.len(), "Fetched listing");
        Ok(posts)
    }

    /// Post a comment under a submission. Takes the bare post id (no `t3_`
    /// prefix) and returns the created comment's fullname (`t1_*`).
    pub async fn post_comment(&self, post_id: &str, body: &str) -> Result<String> {
        let thing_id = format!("t3_{post_id}");
        let params = [
            ("api_type", "json"),
            ("thing_id", thing_id.as_str()),
            ("text", body),
        ];
        let resp = self
            .client
            .post(format!("{OAUTH_BASE}/api/comment"))
            .bearer_auth(&self.token)
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RedditError::from_status(status.as_u16(), message));
        }

        let parsed: CommentResponse = resp.json().await?;
        if !parsed.json.errors.is_empty() {
            // Reddit reports rate limiting inside a 200 body here.
            let message = format!("{:?}", parsed.json.errors);
            if message.contains("RATELIMIT") {
                return Err(RedditError::RateLimited);
            }
            return Err(RedditError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let comment = parsed
            .json
            .data
            .and_then(|d| d.things.into_iter().next())
            .ok_or_else(|| RedditError::Parse("Comment response missing created thing".into()))?;
        tracing::info!(post_id, comment = %comment.data.name, "Comment posted");
        Ok(comment.data.name)
    }

    /// Distinguish a comment as moderator and sticky it to the top of the
    /// thread. Takes the comment fullname returned by `post_comment`.
    pub async fn pin_comment(&self, comment_fullname: &str) -> Result<()> {
        let params = [
            ("api_type", "json"),
            ("id", comment_fullname),
            ("how", "yes"),
            ("sticky", "true"),
        ];
        let resp = self
            .client
            .post(format!("{OAUTH_BASE}/api/distinguish"))
            .bearer_auth(&self.token)
            .form(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RedditError::from_status(status.as_u16(), message));
        }

        tracing::info!(comment = comment_fullname, "Comment pinned");
        Ok(())
    }
}
