//! Game configuration
//!
//! Read from `BLOCKFALL_*` environment variables. Missing or unparsable values
//! fall back to the defaults silently.

use crate::types::{LEVEL_SPEEDS_MS, LOCK_DELAY_MS};

/// Highest configurable start level (the last entry of the speed table)
pub const MAX_START_LEVEL: u32 = LEVEL_SPEEDS_MS.len() as u32;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed seed for the bag; `None` lets the frontend pick one
    pub seed: Option<u32>,
    pub lock_delay_ms: u32,
    /// Level the game starts on, 1 to [`MAX_START_LEVEL`]
    pub start_level: u32,
    /// JSON-lines event log destination
    pub event_log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            lock_delay_ms: LOCK_DELAY_MS,
            start_level: 1,
            event_log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let lock_delay_ms = lookup("BLOCKFALL_LOCK_DELAY_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_delay_ms);

        let start_level = lookup("BLOCKFALL_START_LEVEL")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&level| level >= 1)
            .map(|level| level.min(MAX_START_LEVEL))
            .unwrap_or(defaults.start_level);

        let event_log_path = lookup("BLOCKFALL_EVENT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            lock_delay_ms,
            start_level,
            event_log_path,
        }
    }
}
