//! Rule policy trait for variant implementations.
//!
//! Variants implement `RulePolicy` to define their rules:
//! - Layout and deal shape (via `VariantConfig`)
//! - Which card groups may land on which piles
//! - Which face-up cards merge into the run beneath them
//! - Optional hooks fired on a deal request and after each move
//!
//! The move engine calls into `RulePolicy` but never interprets
//! variant-specific concepts directly.

use crate::core::{Card, Deck, Result, VariantConfig, ACE, KING};
use crate::engine::Move;
use crate::piles::{Pile, PileKind, PileSet};

/// Rule policy trait.
///
/// ## Implementation Notes
///
/// - `can_add` and `can_join` must be pure: no interior mutation, same
///   answer for the same piles
/// - `group` holds the moved cards bottom to top and `group.len() == count`
/// - Hooks return a move for the engine to apply and log; they never touch
///   piles themselves
pub trait RulePolicy: std::fmt::Debug {
    /// Get the variant configuration.
    fn config(&self) -> &VariantConfig;

    /// Whether `group` may be placed on `dst`.
    ///
    /// `src` is `None` when asking hypothetically (e.g. from `can_join`).
    fn can_add(&self, src: Option<&Pile>, dst: &Pile, group: &[Card], count: usize) -> bool;

    /// Whether a face-up card added to `pile` merges into its top run.
    ///
    /// Default: the card could legally be placed there on its own.
    fn can_join(&self, pile: &Pile, card: Card) -> bool {
        self.can_add(None, pile, &[card], 1)
    }

    /// Move to perform when the player asks for a deal.
    ///
    /// Returns `None` if the variant has no deal action or nothing to deal.
    fn on_deal(&self, _piles: &PileSet) -> Option<Move> {
        None
    }

    /// Follow-up move to perform after any player or deal move completes.
    fn on_moved(&self, _piles: &PileSet) -> Option<Move> {
        None
    }

    // === Convenience Methods ===

    /// Variant name.
    fn name(&self) -> &str {
        &self.config().name
    }

    /// Score reached when every card is on a foundation.
    fn max_score(&self) -> i32 {
        self.config().max_score()
    }
}

/// Foundation rule: exactly one card, same suit, ascending from Ace.
#[must_use]
pub fn foundation_accepts(dst: &Pile, group: &[Card], count: usize) -> bool {
    count == 1
        && group
            .last()
            .is_some_and(|&card| dst.by_rank(card, Some(ACE), 1, dst.suit(), false))
}

/// Tableau rule: the group's bottom card builds down by alternate colour,
/// and only a King may fill an empty pile.
#[must_use]
pub fn tableau_accepts(dst: &Pile, group: &[Card]) -> bool {
    group
        .first()
        .is_some_and(|&card| dst.by_alt_color(card, Some(KING), -1, false))
}

/// Legality shared by the Klondike family.
///
/// Cards leave a foundation one at a time, and waste piles accept nothing
/// from the player.
#[must_use]
pub fn standard_can_add(src: Option<&Pile>, dst: &Pile, group: &[Card], count: usize) -> bool {
    if group.len() != count {
        return false;
    }
    if src.is_some_and(|s| s.kind() == PileKind::Foundation) && count != 1 {
        return false;
    }
    match dst.kind() {
        PileKind::Foundation => foundation_accepts(dst, group, count),
        PileKind::Tableau => tableau_accepts(dst, group),
        PileKind::Waste => false,
    }
}

/// Deal the initial cards for one pile from the deck.
///
/// Tableau piles receive their face-down cards then their face-up cards;
/// `waste0` receives the stock face down. Other piles start empty.
pub fn deal_pile(rules: &dyn RulePolicy, pile: &mut Pile, deck: &mut Deck) -> Result<usize> {
    let config = rules.config();
    let (face_down, face_up) = match pile.kind() {
        PileKind::Tableau => match config.tableau_depth.get(pile.index()) {
            Some(depth) => (depth.face_down, depth.face_up),
            None => (0, 0),
        },
        PileKind::Waste if pile.index() == 0 => (config.stock_size, 0),
        _ => (0, 0),
    };

    for _ in 0..face_down {
        pile.add_card(deck.next(false)?, rules);
    }
    for _ in 0..face_up {
        pile.add_card(deck.next(true)?, rules);
    }
    Ok(face_down + face_up)
}

/// Deal every pile of a layout in order: tableau, then waste.
pub fn deal_all(rules: &dyn RulePolicy, piles: &mut PileSet, deck: &mut Deck) -> Result<usize> {
    let mut dealt = 0;
    for kind in [PileKind::Tableau, PileKind::Waste] {
        for pile in piles.iter_mut().filter(|p| p.kind() == kind) {
            dealt += deal_pile(rules, pile, deck)?;
        }
    }
    Ok(dealt)
}
