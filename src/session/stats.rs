//! Per-variant play statistics.

use super::store::{get_parsed, KeyValueStore};
use crate::core::Result;

/// Games played and won for one variant, stored in the section named after
/// the variant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VariantStats {
    pub played: u32,
    pub won: u32,
    /// Fewest moves in a won game, 0 until the first win.
    pub best_moves: usize,
    /// Mean moves over won games.
    pub avg_moves: f64,
}

impl VariantStats {
    /// Count an abandoned or finished game.
    pub fn record_played(&mut self) {
        self.played += 1;
    }

    /// Count a win reached in `moves` moves.
    pub fn record_win(&mut self, moves: usize) {
        if self.best_moves == 0 || moves < self.best_moves {
            self.best_moves = moves;
        }
        self.avg_moves = (self.avg_moves * f64::from(self.won) + moves as f64) / f64::from(self.won + 1);
        self.won += 1;
    }

    /// Stats for a variant with no saved section yet. The game in progress
    /// counts as played.
    #[must_use]
    pub fn first_game() -> Self {
        Self {
            played: 1,
            ..Self::default()
        }
    }

    /// Read the stats for `variant`, defaulting missing keys to zero.
    ///
    /// A store with no `played` entry for the variant yields `first_game()`.
    pub fn load(store: &dyn KeyValueStore, variant: &str) -> Result<Self> {
        let Some(played) = get_parsed(store, variant, "played")? else {
            return Ok(Self::first_game());
        };
        Ok(Self {
            played,
            won: get_parsed(store, variant, "won")?.unwrap_or(0),
            best_moves: get_parsed(store, variant, "best_moves")?.unwrap_or(0),
            avg_moves: get_parsed(store, variant, "avg_moves")?.unwrap_or(0.0),
        })
    }

    /// Write the stats for `variant`.
    pub fn save(&self, store: &mut dyn KeyValueStore, variant: &str) {
        store.set(variant, "played", self.played.to_string());
        store.set(variant, "won", self.won.to_string());
        store.set(variant, "best_moves", self.best_moves.to_string());
        store.set(variant, "avg_moves", self.avg_moves.to_string());
    }
}
