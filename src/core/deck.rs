//! Shuffled card sequence with a dealing cursor.
//!
//! The deck keeps its full shuffled order after dealing so that a restart
//! can rewind the cursor and redeal exactly the same game.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit, ACE, KING};
use super::error::{EngineError, Result};
use super::rng::{GameRng, GameRngState};

/// Cards in one standard deck.
pub const CARDS_PER_DECK: usize = 52;

/// An ordered sequence of `decks × 52` cards with a cursor.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
    decks: usize,
    rng: GameRng,
}

impl Deck {
    /// Build `num_decks × 52` face-down cards in canonical suit/rank order.
    ///
    /// The deck is not shuffled; call `shuffle` or `rewind(true)`.
    #[must_use]
    pub fn new(num_decks: usize) -> Self {
        Self::with_rng(num_decks, GameRng::from_entropy())
    }

    /// Build an unshuffled deck that will shuffle deterministically from `seed`.
    #[must_use]
    pub fn with_seed(num_decks: usize, seed: u64) -> Self {
        Self::with_rng(num_decks, GameRng::new(seed))
    }

    fn with_rng(num_decks: usize, rng: GameRng) -> Self {
        assert!(num_decks > 0, "Must have at least 1 deck");

        let mut cards = Vec::with_capacity(num_decks * CARDS_PER_DECK);
        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in ACE..=KING {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        Self {
            cards,
            cursor: 0,
            decks: num_decks,
            rng,
        }
    }

    /// Number of standard decks combined.
    #[must_use]
    pub fn decks(&self) -> usize {
        self.decks
    }

    /// Total number of cards, dealt or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Current cursor position (number of cards dealt).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of cards still to be dealt.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Randomly permute the deck and reset the cursor.
    pub fn shuffle(&mut self) {
        self.rng.shuffle(&mut self.cards);
        self.cursor = 0;
    }

    /// Deal the card at the cursor with the given orientation.
    pub fn next(&mut self, faceup: bool) -> Result<Card> {
        let card = self
            .cards
            .get(self.cursor)
            .copied()
            .ok_or(EngineError::DeckExhausted {
                dealt: self.cursor,
                len: self.cards.len(),
            })?;
        self.cursor += 1;
        Ok(card.with_faceup(faceup))
    }

    /// Reset the cursor, optionally reshuffling.
    pub fn rewind(&mut self, shuffle: bool) {
        if shuffle {
            self.shuffle();
        } else {
            self.cursor = 0;
        }
    }

    /// Cards in dealing order, including already dealt ones.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Export the deck order, cursor and RNG position.
    #[must_use]
    pub fn export(&self) -> DeckState {
        DeckState {
            cards: self.cards.iter().map(|c| (c.suit, c.rank)).collect(),
            cursor: self.cursor,
            rng: self.rng.state(),
        }
    }

    /// Restore a deck from its exported state.
    pub fn import(state: &DeckState) -> Result<Self> {
        let len = state.cards.len();
        if len == 0 || len % CARDS_PER_DECK != 0 {
            return Err(EngineError::CorruptSaveData(format!(
                "deck holds {} cards, not a multiple of {}",
                len, CARDS_PER_DECK
            )));
        }
        if state.cursor > len {
            return Err(EngineError::CorruptSaveData(format!(
                "deck cursor {} beyond {} cards",
                state.cursor, len
            )));
        }

        let cards = state
            .cards
            .iter()
            .map(|&(suit, rank)| Card::import((suit, rank, false)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| EngineError::CorruptSaveData("deck card rank out of range".to_string()))?;

        Ok(Self {
            cards,
            cursor: state.cursor,
            decks: len / CARDS_PER_DECK,
            rng: GameRng::from_state(&state.rng),
        })
    }
}

/// Persisted deck: full order as `(suit, rank)` pairs, cursor, RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub cards: Vec<(Suit, Rank)>,
    pub cursor: usize,
    pub rng: GameRngState,
}
