//! Game sessions and their persistence.
//!
//! ## Key Types
//!
//! - `GameSession`: a game in progress, driving the move engine
//! - `KeyValueStore`: section/key persistence contract, with `MemoryStore`
//! - `Snapshot`: bincode-encoded copy of a whole session
//! - `VariantStats`: games played and won per variant

pub mod game;
pub mod snapshot;
pub mod stats;
pub mod store;

pub use game::{GameSession, MoveOutcome};
pub use snapshot::Snapshot;
pub use stats::VariantStats;
pub use store::{KeyValueStore, MemoryStore, GAME_SECTION, MOVES_SECTION, PILES_SECTION};
