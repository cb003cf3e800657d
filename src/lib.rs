//! # solitaire-engine
//!
//! A rules and move engine for patience card games with replayable
//! undo/redo history.
//!
//! ## Design Principles
//!
//! 1. **Variant-Agnostic**: No hardcoded layouts. Variants describe their
//!    piles and deal through `VariantConfig` and add rules through
//!    `RulePolicy`.
//!
//! 2. **Reversible by Construction**: Every applied move is logged with the
//!    side effects needed to undo it exactly. Undo and redo replay the log
//!    through the same mutation path as play.
//!
//! 3. **Validate, Then Mutate**: A move is fully checked before any pile
//!    changes, so a rejected move never leaves partial state.
//!
//! ## Architecture
//!
//! - **Runs**: A pile is a stack of runs; a run is the unit moved between
//!   piles, split when only part of it is picked up.
//!
//! - **Persistent Log**: The move log uses `im` vectors, so snapshots share
//!   history with the live session.
//!
//! - **Abstract Persistence**: Sessions write through a `KeyValueStore`;
//!   a bincode `Snapshot` captures a whole game at once.
//!
//! ## Modules
//!
//! - `core`: Cards, decks, RNG, variant configuration, errors
//! - `piles`: Pile identities, runs, piles and pile sets
//! - `rules`: RulePolicy trait, shared legality, variant registry
//! - `games`: Klondike and Yukon
//! - `engine`: Moves, the move log, and the move engine
//! - `session`: Game sessions, persistence, statistics

pub mod core;
pub mod engine;
pub mod games;
pub mod piles;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, CardExport, Color, Rank, Suit,
    Deck, DeckState,
    GameRng, GameRngState,
    DealDepth, VariantConfig,
    EngineError, Result,
};

pub use crate::piles::{MoveFlags, Pile, PileId, PileKind, PileSet, Run};

pub use crate::rules::{RulePolicy, VariantRegistry};

pub use crate::games::{Klondike, Yukon};

pub use crate::engine::{LogEntry, Move, MoveEngine, MoveEvent, MoveLog, MoveObserver, MoveRequest};

pub use crate::session::{GameSession, KeyValueStore, MemoryStore, MoveOutcome, Snapshot, VariantStats};
