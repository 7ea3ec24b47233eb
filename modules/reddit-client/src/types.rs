use serde::Deserialize;

/// One submission from a subreddit listing. `selftext` is empty for link posts.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub author: String,
    pub created_utc: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

// Everything Reddit returns is wrapped in a kind/data "Thing" envelope.

#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingData {
    pub children: Vec<Thing<Submission>>,
}

// POST /api/comment with api_type=json nests the created comment one level
// deeper than listings do.

#[derive(Debug, Deserialize)]
pub(crate) struct CommentResponse {
    pub json: CommentJson,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentJson {
    #[serde(default)]
    pub errors: Vec<Vec<serde_json::Value>>,
    pub data: Option<CommentData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentData {
    pub things: Vec<Thing<CreatedComment>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedComment {
    /// Comment fullname, e.g. "t1_abc123".
    pub name: String,
}
