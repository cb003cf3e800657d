//! Runs: contiguous card groups moved as one unit.
//!
//! Every element of a pile is a run. A single card is a run of length 1, so
//! piles never need to distinguish loose cards from grouped ones.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Card;

/// Ordered cards, bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// SmallVec covers a full King-to-Ace tableau run without heap allocation.
    cards: SmallVec<[Card; 13]>,
}

impl Run {
    /// A run holding one card.
    #[must_use]
    pub fn new(card: Card) -> Self {
        let mut cards = SmallVec::new();
        cards.push(card);
        Self { cards }
    }

    /// Build a run from cards listed bottom to top.
    ///
    /// Returns `None` for an empty slice; runs always hold at least one card.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(Self {
            cards: SmallVec::from_slice(cards),
        })
    }

    /// Number of cards in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a well-formed run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards, bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Topmost card.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Bottommost card.
    #[must_use]
    pub fn bottom_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// A run is face up when its top card is.
    #[must_use]
    pub fn is_faceup(&self) -> bool {
        self.top_card().is_some_and(|c| c.faceup)
    }

    /// Append a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Detach the bottom `count` cards into a new run.
    ///
    /// Returns `None` (leaving the run untouched) unless `0 < count < len`.
    pub fn split_bottom(&mut self, count: usize) -> Option<Run> {
        if count == 0 || count >= self.cards.len() {
            return None;
        }
        let under: SmallVec<[Card; 13]> = self.cards.drain(..count).collect();
        Some(Run { cards: under })
    }

    /// Consume the run, yielding its cards bottom to top.
    #[must_use]
    pub fn into_cards(self) -> SmallVec<[Card; 13]> {
        self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    fn up(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank).flipped()
    }

    #[test]
    fn test_single_card_run() {
        let run = Run::new(up(Suit::Spades, 5));
        assert_eq!(run.len(), 1);
        assert_eq!(run.top_card(), run.bottom_card());
        assert!(run.is_faceup());
    }

    #[test]
    fn test_from_cards() {
        assert!(Run::from_cards(&[]).is_none());

        let run = Run::from_cards(&[up(Suit::Spades, 9), up(Suit::Hearts, 8)]).unwrap();
        assert_eq!(run.bottom_card(), Some(Card::new(Suit::Spades, 9)));
        assert_eq!(run.top_card(), Some(Card::new(Suit::Hearts, 8)));
    }

    #[test]
    fn test_split_bottom() {
        let mut run = Run::from_cards(&[
            up(Suit::Spades, 9),
            up(Suit::Hearts, 8),
            up(Suit::Clubs, 7),
        ])
        .unwrap();

        let under = run.split_bottom(2).unwrap();
        assert_eq!(under.cards(), &[Card::new(Suit::Spades, 9), Card::new(Suit::Hearts, 8)]);
        assert_eq!(run.cards(), &[Card::new(Suit::Clubs, 7)]);
    }

    #[test]
    fn test_split_bounds() {
        let mut run = Run::from_cards(&[up(Suit::Spades, 9), up(Suit::Hearts, 8)]).unwrap();
        assert!(run.split_bottom(0).is_none());
        assert!(run.split_bottom(2).is_none());
        assert_eq!(run.len(), 2);
    }
}
