//! Binary snapshot of a whole session.
//!
//! A `Snapshot` captures everything needed to resume a game exactly: the
//! variant, every pile's cards, the deck with its RNG position, the move
//! log and the score. It encodes with bincode into a compact blob.

use serde::{Deserialize, Serialize};

use crate::core::{CardExport, DeckState, Result};
use crate::engine::LogEntry;
use crate::piles::PileId;

/// Serializable session state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub variant: String,
    pub piles: Vec<(PileId, Vec<CardExport>)>,
    pub deck: DeckState,
    pub entries: Vec<LogEntry>,
    pub position: usize,
    pub score: i32,
    pub won: bool,
}

impl Snapshot {
    /// Encode as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
