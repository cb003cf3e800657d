//! Key-value persistence contract.
//!
//! A saved game is a set of string values grouped into sections:
//!
//! | Section     | Keys                                              |
//! |-------------|---------------------------------------------------|
//! | `game`      | `name`, `score`, `won`, `deck`                    |
//! | `moves`     | `count`, `max`, and `"0"..max` (JSON move lists)  |
//! | `piles`     | pile ids such as `tableau0` (JSON card lists)     |
//! | *variant*   | `played`, `won`, `best_moves`, `avg_moves`        |
//!
//! How the sections reach disk is the host's business; `MemoryStore` keeps
//! them in memory.

use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::core::{EngineError, Result};

/// Section holding the variant name, score, win flag and deck.
pub const GAME_SECTION: &str = "game";
/// Section holding the move log.
pub const MOVES_SECTION: &str = "moves";
/// Section holding pile contents.
pub const PILES_SECTION: &str = "piles";

/// Section/key string store.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, section: &str, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, section: &str, key: &str, value: String);

    /// Remove every key in a section.
    fn clear_section(&mut self, section: &str);
}

/// Read and parse a value. A missing key yields `Ok(None)`.
pub fn get_parsed<T: FromStr>(store: &dyn KeyValueStore, section: &str, key: &str) -> Result<Option<T>> {
    match store.get(section, key) {
        None => Ok(None),
        Some(text) => text.trim().parse().map(Some).map_err(|_| {
            EngineError::CorruptSaveData(format!("{}.{} has unreadable value '{}'", section, key, text))
        }),
    }
}

/// Read a value that must be present.
pub fn get_required(store: &dyn KeyValueStore, section: &str, key: &str) -> Result<String> {
    store
        .get(section, key)
        .ok_or_else(|| EngineError::CorruptSaveData(format!("{}.{} is missing", section, key)))
}

/// In-memory store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    sections: FxHashMap<String, FxHashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys present in a section, sorted.
    #[must_use]
    pub fn keys(&self, section: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .sections
            .get(section)
            .map(|s| s.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(FxHashMap::is_empty)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }

    fn set(&mut self, section: &str, key: &str, value: String) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    fn clear_section(&mut self, section: &str) {
        self.sections.remove(section);
    }
}
