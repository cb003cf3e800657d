//! Move representation: a transfer of `count` cards between two piles.
//!
//! A `Move` is the unit the engine validates, applies and reverses. Several
//! moves caused by one player action (a player move plus its auto-deal, or a
//! redeal) are grouped into one `LogEntry` so they undo together.
//!
//! ## Export format
//!
//! Moves persist as JSON objects keyed `src`, `dst`, `n` plus their flags.
//! Missing flags read as `false`:
//!
//! ```
//! use solitaire_engine::engine::Move;
//! use solitaire_engine::piles::PileId;
//!
//! let mv = Move::new(PileId::waste(0), PileId::waste(1), 3).with_flip();
//! assert_eq!(
//!     mv.export(),
//!     r#"{"src":"waste0","dst":"waste1","n":3,"flip":true,"append":false,"expose":false}"#
//! );
//! assert_eq!(Move::import(r#"{"src":"waste0","dst":"waste1","n":3,"flip":true}"#).unwrap(), mv);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Result;
use crate::piles::{MoveFlags, PileId};

/// A single card transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source pile.
    pub src: PileId,

    /// Destination pile.
    pub dst: PileId,

    /// Number of cards moved.
    #[serde(rename = "n")]
    pub count: usize,

    /// Every moved card is turned over.
    #[serde(default)]
    pub flip: bool,

    /// Belongs to the same log entry as the previous move.
    #[serde(default)]
    pub append: bool,

    /// The source's new top card was turned face up afterwards.
    ///
    /// Filled in by the engine when the move is applied.
    #[serde(default)]
    pub expose: bool,
}

impl Move {
    /// Create a plain move.
    #[must_use]
    pub fn new(src: PileId, dst: PileId, count: usize) -> Self {
        Self {
            src,
            dst,
            count,
            flip: false,
            append: false,
            expose: false,
        }
    }

    /// Turn the moved cards over.
    #[must_use]
    pub fn with_flip(mut self) -> Self {
        self.flip = true;
        self
    }

    /// Join the previous log entry.
    #[must_use]
    pub fn appended(mut self) -> Self {
        self.append = true;
        self
    }

    /// Move that undoes this one.
    ///
    /// Cards travel back with the same flip; a card exposed on the way out
    /// is covered again before they land.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            src: self.dst,
            dst: self.src,
            count: self.count,
            flip: self.flip,
            append: self.append,
            expose: false,
        }
    }

    /// Pile flags for applying this move.
    #[must_use]
    pub fn forward_flags(&self) -> MoveFlags {
        MoveFlags {
            expose: self.expose,
            cover: false,
            flip: self.flip,
        }
    }

    /// Pile flags for reversing this move.
    #[must_use]
    pub fn reverse_flags(&self) -> MoveFlags {
        MoveFlags {
            expose: false,
            cover: self.expose,
            flip: self.flip,
        }
    }

    /// Serialize to the persisted JSON form.
    #[must_use]
    pub fn export(&self) -> String {
        // Only strings, integers and bools: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse the persisted JSON form.
    pub fn import(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{} -> {}", self.src, self.count, self.dst)?;
        if self.flip {
            write!(f, " (flip)")?;
        }
        Ok(())
    }
}

/// A request to move cards, before validation.
///
/// The engine turns an accepted request into a `Move`, filling in whether
/// the source's next card gets exposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub src: PileId,
    pub dst: PileId,
    pub count: usize,
    pub flip: bool,
    pub append: bool,
}

impl MoveRequest {
    #[must_use]
    pub fn new(src: PileId, dst: PileId, count: usize) -> Self {
        Self {
            src,
            dst,
            count,
            flip: false,
            append: false,
        }
    }

    /// Turn the moved cards over.
    #[must_use]
    pub fn with_flip(mut self) -> Self {
        self.flip = true;
        self
    }

    /// Join the previous log entry.
    #[must_use]
    pub fn appended(mut self) -> Self {
        self.append = true;
        self
    }

    /// The move this request becomes if accepted.
    #[must_use]
    pub fn to_move(&self, expose: bool) -> Move {
        Move {
            src: self.src,
            dst: self.dst,
            count: self.count,
            flip: self.flip,
            append: self.append,
            expose,
        }
    }
}

/// One undo step: a player move and any moves appended to it.
///
/// SmallVec covers the common one or two moves without heap allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry {
    moves: SmallVec<[Move; 2]>,
}

impl LogEntry {
    /// Entry holding a single move.
    #[must_use]
    pub fn new(mv: Move) -> Self {
        let mut moves = SmallVec::new();
        moves.push(mv);
        Self { moves }
    }

    /// Add a move to the end of the entry.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    /// Moves in the order they were applied.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Serialize to a JSON array of moves.
    #[must_use]
    pub fn export(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse a JSON array of moves.
    pub fn import(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
