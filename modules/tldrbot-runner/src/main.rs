use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::GeminiClient;
use reddit_client::{Credentials, RedditClient};
use tldrbot_common::BotConfig;
use tldrbot_runner::cycle::{CycleConfig, CycleRunner};
use tldrbot_runner::{dashboard, RedditForum};
use tldrbot_state::{JsonStateStore, StateStore};

#[derive(Parser, Debug)]
#[command(name = "tldr-bot", about = "One TLDR run cycle: fetch, summarize, comment, pin")]
struct Args {
    /// Log what would happen without posting comments or touching state.
    #[arg(long)]
    dry_run: bool,
}

/// Default to info for every crate in this workspace; RUST_LOG still wins.
const LOG_DIRECTIVES: [&str; 5] = [
    "tldrbot_runner=info",
    "tldrbot_common=info",
    "tldrbot_state=info",
    "reddit_client=info",
    "gemini_client=info",
];

fn env_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(env_filter()?).init();

    let args = Args::parse();
    info!(dry_run = args.dry_run, "TLDR bot starting");

    let config = BotConfig::from_env()?;

    let reddit = RedditClient::login(&Credentials {
        client_id: config.reddit_client_id.clone(),
        client_secret: config.reddit_client_secret.clone(),
        username: config.reddit_username.clone(),
        password: config.reddit_password.clone(),
    })
    .await?;

    let forum = Arc::new(RedditForum::new(reddit, &config.subreddit));
    let gemini = GeminiClient::new(&config.gemini_api_key, &config.gemini_model);
    let store = Arc::new(JsonStateStore::new(&config.state_file));

    let runner = CycleRunner::new(
        Arc::clone(&forum),
        gemini,
        forum,
        Arc::clone(&store),
        CycleConfig {
            word_threshold: config.word_threshold,
            max_tldr_per_run: config.max_tldr_per_run,
            dry_run: args.dry_run,
        },
    );

    let stats = runner.run().await?;
    println!("{stats}");

    if !args.dry_run {
        let state = store.load()?;
        dashboard::write_snapshot(Path::new(&config.stats_file), &state.stats)?;
        info!(path = %config.stats_file, "Dashboard feed refreshed");
    }

    Ok(())
}
