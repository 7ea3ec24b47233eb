use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Secrets come from the environment; behavior knobs have defaults and are
/// validated at startup so a bad override fails the run before any I/O.
#[derive(Debug, Clone)]
pub struct BotConfig {
    // Reddit (script app, moderator account)
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_username: String,
    pub reddit_password: String,

    // Gemini
    pub gemini_api_key: String,
    pub gemini_model: String,

    // Bot behavior
    pub subreddit: String,
    pub word_threshold: usize,
    pub max_tldr_per_run: usize,

    // State
    pub state_file: String,
    pub stats_file: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            reddit_client_id: required_env("REDDIT_CLIENT_ID")?,
            reddit_client_secret: required_env("REDDIT_CLIENT_SECRET")?,
            reddit_username: required_env("REDDIT_USERNAME")?,
            reddit_password: required_env("REDDIT_PASSWORD")?,
            gemini_api_key: required_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash"),
            subreddit: env_or("SUBREDDIT", "accelerate"),
            word_threshold: positive_env("WORD_THRESHOLD", 500)?,
            max_tldr_per_run: positive_env("MAX_TLDR_PER_RUN", 5)?,
            state_file: env_or("STATE_FILE", "data/tldr_state.json"),
            stats_file: env_or("STATS_FILE", "data/stats.json"),
        };

        config.log_redacted();
        Ok(config)
    }

    fn log_redacted(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  SUBREDDIT: {}", self.subreddit);
        tracing::info!("  WORD_THRESHOLD: {}", self.word_threshold);
        tracing::info!("  MAX_TLDR_PER_RUN: {}", self.max_tldr_per_run);
        tracing::info!("  GEMINI_MODEL: {}", self.gemini_model);
        tracing::info!("  REDDIT_USERNAME: {}", self.reddit_username);
        tracing::info!("  REDDIT_CLIENT_ID: {}", preview(&self.reddit_client_id));
        tracing::info!("  GEMINI_API_KEY: {}", preview(&self.gemini_api_key));
        tracing::info!("  STATE_FILE: {}", self.state_file);
    }
}

// Char-wise so a multibyte secret can't split a boundary.
fn preview(val: &str) -> String {
    let head: String = val.chars().take(4).collect();
    format!("{head}...({} chars)", val.len())
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("{key} environment variable is required"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn positive_env(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => parse_positive(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be an integer, got {raw:?}"))?;
    if value == 0 {
        bail!("{key} must be a positive integer, got 0");
    }
    Ok(value)
}
