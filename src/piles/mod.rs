//! Pile system for card locations.
//!
//! Piles are **variant-configured**: a variant's `VariantConfig` decides how
//! many tableau, foundation and waste piles exist.
//!
//! ## Key Types
//!
//! - `PileId`: `(kind, index)` identity, persisted as `"<kind><index>"`
//! - `Run`: contiguous card group moved as one unit
//! - `Pile`: ordered stack of runs with add/remove/split/join operations
//! - `MoveFlags`: orientation side effects of a card transfer
//! - `PileSet`: every pile of a layout, addressable by id

pub mod id;
pub mod pile;
pub mod run;
pub mod set;

pub use id::{ParsePileIdError, PileId, PileKind};
pub use pile::{MoveFlags, Pile};
pub use run::Run;
pub use set::PileSet;
