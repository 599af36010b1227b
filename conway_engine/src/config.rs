// config.rs - Engine tunables

use serde::{Deserialize, Serialize};

pub const DEFAULT_HISTORY_LIMIT : usize = 50;
pub const DEFAULT_CHUNK_SIZE    : usize = 1024 * 1024; // 1 MiB
pub const DEFAULT_STORAGE_KEY   : &str  = "gameOfLife";
pub const DEFAULT_CYCLE_WINDOW  : usize = 10;

/// Static configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Most history entries kept in memory and on disk; 0 keeps everything.
    pub history_limit: usize,
    /// Serialized states longer than this many bytes are stored in chunks.
    pub chunk_size: usize,
    /// Base storage key; chunks live under `<key>_chunk_<i>` and `<key>_chunks`.
    pub storage_key: String,
    /// Number of recent generations checked for a repeat.
    pub cycle_window: usize,
    /// Stop playing once the board empties or repeats.
    pub stop_on_cycle: bool,
    /// Seed for color assignment; entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            cycle_window: DEFAULT_CYCLE_WINDOW,
            stop_on_cycle: true,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { rng_seed: Some(seed), ..Self::default() }
    }
}
