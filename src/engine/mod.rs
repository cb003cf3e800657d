//! Move engine: moves, the undo log, and their application to piles.
//!
//! ## Key Types
//!
//! - `MoveRequest`: what the player asked for
//! - `Move`: an accepted transfer, as applied and logged
//! - `LogEntry` / `MoveLog`: grouped undo steps with a redo high-water mark
//! - `MoveEngine`: validates requests and applies or reverses moves
//! - `MoveObserver` / `MoveEvent`: notification of each applied transfer

pub mod executor;
pub mod history;
pub mod moves;
pub mod observer;

pub use executor::MoveEngine;
pub use history::MoveLog;
pub use moves::{LogEntry, Move, MoveRequest};
pub use observer::{MoveEvent, MoveObserver};
