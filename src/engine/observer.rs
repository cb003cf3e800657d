//! Observer hook for applied moves.
//!
//! The engine reports every card transfer it performs, including replays
//! from undo and redo, so a front end can animate them and a persistence
//! layer can follow along. The engine never waits on the observer.

use super::moves::Move;

/// One card transfer as seen by an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    /// The move as logged. For a reversal the cards travel `dst` to `src`.
    pub mv: Move,
    /// Score change caused by this transfer.
    pub score_delta: i32,
    /// Replayed from the log (undo, redo or seek) rather than requested.
    pub replay: bool,
    /// The move was undone.
    pub reverse: bool,
}

/// Receiver for move notifications.
pub trait MoveObserver {
    /// Called after each transfer is applied to the piles.
    fn on_move(&mut self, event: &MoveEvent);

    /// Called once when a move first brings the score to its maximum.
    fn on_win(&mut self, _score: i32) {}
}
