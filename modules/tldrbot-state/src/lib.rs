//! Durable cross-cycle state: processed-post records and run statistics.
//!
//! The process itself is stateless between invocations; everything the bot
//! remembers lives in one JSON file written with atomic replace-on-write.

pub mod state;
pub mod store;

pub use state::{BotState, Outcome, ProcessedRecord, RunStats};
pub use store::{JsonStateStore, MemoryStateStore, StateStore};
