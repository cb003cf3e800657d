//! Engine error taxonomy.
//!
//! Rule predicates and pile-level operations never fail loudly: they return
//! `bool` or empty collections. Only engine orchestration (deck cursor,
//! persisted-data parsing, move requests) produces an `EngineError`.

use crate::piles::PileId;

/// Errors raised by the move engine and game session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A requested move fails the variant's rules. Nothing was changed.
    IllegalMove {
        src: PileId,
        dst: PileId,
        count: usize,
        reason: &'static str,
    },

    /// `Deck::next` was called past the last card.
    DeckExhausted { dealt: usize, len: usize },

    /// Persisted pile, move or deck data could not be parsed.
    CorruptSaveData(String),

    /// No variant with this name is registered.
    UnknownVariant(String),

    /// The active layout has no pile with this id.
    UnknownPile(PileId),

    /// A logged move could not be replayed. Always an engine bug.
    IrreversibleMove(String),

    /// Undo requested at log position 0.
    NothingToUndo,

    /// Redo requested at the high-water mark.
    NothingToRedo,
}

impl EngineError {
    /// Whether the caller can simply ignore this error and carry on.
    ///
    /// Illegal moves and empty undo/redo ranges are user-level no-ops;
    /// everything else means the session should fall back to a new game.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalMove { .. } | EngineError::NothingToUndo | EngineError::NothingToRedo
        )
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::IllegalMove {
                src,
                dst,
                count,
                reason,
            } => write!(f, "illegal move of {} card(s) from {} to {}: {}", count, src, dst, reason),
            EngineError::DeckExhausted { dealt, len } => {
                write!(f, "deck exhausted after {} of {} cards", dealt, len)
            }
            EngineError::CorruptSaveData(msg) => write!(f, "corrupt save data: {}", msg),
            EngineError::UnknownVariant(name) => write!(f, "unknown variant '{}'", name),
            EngineError::UnknownPile(id) => write!(f, "unknown pile {}", id),
            EngineError::IrreversibleMove(msg) => write!(f, "logged move cannot be replayed: {}", msg),
            EngineError::NothingToUndo => write!(f, "nothing to undo"),
            EngineError::NothingToRedo => write!(f, "nothing to redo"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::CorruptSaveData(err.to_string())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::CorruptSaveData(err.to_string())
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
