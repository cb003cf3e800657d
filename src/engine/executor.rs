//! Move engine: validation and application of card transfers.
//!
//! `MoveEngine` borrows a variant's rules and the live piles for the
//! duration of one operation. Validation never mutates; application runs a
//! transfer to completion or fails before touching either pile.

use super::moves::{Move, MoveRequest};
use crate::core::{EngineError, Result};
use crate::piles::{MoveFlags, Pile, PileId, PileKind, PileSet};
use crate::rules::RulePolicy;

/// Validates and applies moves against a pile set.
pub struct MoveEngine<'a> {
    rules: &'a dyn RulePolicy,
    piles: &'a mut PileSet,
}

impl<'a> MoveEngine<'a> {
    #[must_use]
    pub fn new(rules: &'a dyn RulePolicy, piles: &'a mut PileSet) -> Self {
        Self { rules, piles }
    }

    fn pile(&self, id: PileId) -> Result<&Pile> {
        self.piles.get(id).ok_or(EngineError::UnknownPile(id))
    }

    /// Whether moving `count` cards off `src` leaves a face-down tableau
    /// card on top that should be turned up.
    #[must_use]
    pub fn exposes(src: &Pile, count: usize) -> bool {
        if src.kind() != PileKind::Tableau || src.size() <= count {
            return false;
        }
        let cards = src.cards();
        !cards[cards.len() - count - 1].faceup
    }

    /// Check a request against the rules without changing anything.
    ///
    /// The moved group must be the top `count` face-up cards of the source's
    /// top run. On success returns the move to apply.
    pub fn validate(&self, req: &MoveRequest) -> Result<Move> {
        let illegal = |reason: &'static str| EngineError::IllegalMove {
            src: req.src,
            dst: req.dst,
            count: req.count,
            reason,
        };

        let src = self.pile(req.src)?;
        let dst = self.pile(req.dst)?;
        if req.src == req.dst {
            return Err(illegal("source and destination are the same pile"));
        }
        if req.count == 0 {
            return Err(illegal("no cards selected"));
        }
        let group = src.top_group(req.count).ok_or_else(|| illegal("cards do not form one run"))?;
        if group.iter().any(|c| !c.faceup) {
            return Err(illegal("face-down cards cannot be moved"));
        }
        if !self.rules.can_add(Some(src), dst, group, req.count) {
            return Err(illegal("not allowed by the rules"));
        }

        Ok(req.to_move(Self::exposes(src, req.count)))
    }

    /// Fill in a variant hook's move, which bypasses the legality check.
    ///
    /// Only pile existence and card count are checked.
    pub fn prepare(&self, mv: Move) -> Result<Move> {
        let src = self.pile(mv.src)?;
        self.pile(mv.dst)?;
        if mv.src == mv.dst || mv.count == 0 || mv.count > src.size() {
            return Err(EngineError::IllegalMove {
                src: mv.src,
                dst: mv.dst,
                count: mv.count,
                reason: "hook move does not fit its piles",
            });
        }
        Ok(Move {
            expose: Self::exposes(src, mv.count),
            ..mv
        })
    }

    /// Apply a move forward. Returns its score delta.
    pub fn apply(&mut self, mv: &Move) -> Result<i32> {
        self.transfer(mv, mv.src, mv.dst, mv.forward_flags())?;
        log::debug!("apply {}", mv);
        Ok(self.score_delta(mv))
    }

    /// Undo a logged move. Returns the score delta of the reversal.
    ///
    /// A logged move that cannot be reversed means the log and the piles
    /// have diverged; this is reported as `IrreversibleMove`.
    pub fn reverse(&mut self, mv: &Move) -> Result<i32> {
        let back = mv.inverse();
        self.transfer(mv, back.src, back.dst, mv.reverse_flags())?;
        log::debug!("reverse {}", mv);
        Ok(-self.score_delta(mv))
    }

    /// Points gained by a move: cards landing on a foundation score, cards
    /// leaving one cost the same.
    #[must_use]
    pub fn score_delta(&self, mv: &Move) -> i32 {
        let points = self.rules.config().foundation_points * mv.count as i32;
        match (mv.src.kind, mv.dst.kind) {
            (PileKind::Foundation, PileKind::Foundation) => 0,
            (_, PileKind::Foundation) => points,
            (PileKind::Foundation, _) => -points,
            _ => 0,
        }
    }

    fn transfer(&mut self, mv: &Move, from: PileId, to: PileId, flags: MoveFlags) -> Result<()> {
        let rules = self.rules;
        let (src, dst) = self
            .piles
            .pair_mut(from, to)
            .ok_or_else(|| EngineError::IrreversibleMove(format!("{}: piles unavailable", mv)))?;
        if !src.move_num_cards_to(dst, mv.count, flags, rules) {
            return Err(EngineError::IrreversibleMove(format!(
                "{}: {} holds only {} card(s)",
                mv,
                from,
                src.size()
            )));
        }
        Ok(())
    }
}
