//! StateStore implementations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::state::BotState;

/// Durable container for cross-cycle state. Injected into the run-cycle
/// controller; implemented by `JsonStateStore` (production) and
/// `MemoryStateStore` (tests).
pub trait StateStore: Send + Sync {
    fn load(&self) -> Result<BotState>;
    fn save(&self, state: &BotState) -> Result<()>;
}

/// Write JSON to `path` via a temp file in the same directory plus an atomic
/// rename, so a crash mid-write can never leave a torn file behind.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let json = serde_json::to_string_pretty(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JsonStateStore (production — single JSON file)
// ---------------------------------------------------------------------------

/// Human-inspectable JSON file with atomic replace-on-write.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> Result<BotState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BotState::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Ok(state),
            Err(e) => {
                // Writes are atomic, so an unparseable file means something
                // outside the bot touched it. Start fresh rather than wedge;
                // worst case is one duplicate comment per recent post.
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "State file unreadable, starting from empty state"
                );
                Ok(BotState::default())
            }
        }
    }

    fn save(&self, state: &BotState) -> Result<()> {
        write_json_atomic(&self.path, state)
    }
}

// ---------------------------------------------------------------------------
// MemoryStateStore (tests — no filesystem required)
// ---------------------------------------------------------------------------

/// In-memory store for tests. Records every save so tests can assert what was
/// durable at each point in a cycle.
#[derive(Default)]
pub struct MemoryStateStore {
    inner: Mutex<BotState>,
    saves: Mutex<Vec<BotState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: BotState) -> Self {
        Self {
            inner: Mutex::new(state),
            saves: Mutex::new(Vec::new()),
        }
    }

    /// Current state (what a subsequent load would see).
    pub fn snapshot(&self) -> BotState {
        self.inner.lock().unwrap().clone()
    }

    /// Every state ever saved, in order.
    pub fn saves(&self) -> Vec<BotState> {
        self.saves.lock().unwrap().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<BotState> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn save(&self, state: &BotState) -> Result<()> {
        *self.inner.lock().unwrap() = state.clone();
        self.saves.lock().unwrap().push(state.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Arc<S> blanket — lets tests share the store for assertions
// ---------------------------------------------------------------------------

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn load(&self) -> Result<BotState> {
        (**self).load()
    }

    fn save(&self, state: &BotState) -> Result<()> {
        (**self).save(state)
    }
}
