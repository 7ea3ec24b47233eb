pub mod config;
pub mod types;
pub mod words;

pub use config::BotConfig;
pub use types::CandidatePost;
