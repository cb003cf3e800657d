//! Variant configuration.
//!
//! Variants configure the engine by providing a `VariantConfig`:
//! - pile counts (tableau, waste) and deck count
//! - per-tableau deal depth `(face_down, face_up)`
//! - stock size and `deal_by` for variants with a waste pile
//! - scoring
//!
//! The engine never hardcodes a layout - variants define it.

use serde::{Deserialize, Serialize};

use super::card::Suit;
use super::deck::CARDS_PER_DECK;

/// Default points awarded per card placed on a foundation.
pub const DEFAULT_FOUNDATION_POINTS: i32 = 10;

/// Initial deal for one tableau pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealDepth {
    /// Cards dealt face down first.
    pub face_down: usize,
    /// Cards dealt face up on top.
    pub face_up: usize,
}

impl DealDepth {
    #[must_use]
    pub const fn new(face_down: usize, face_up: usize) -> Self {
        Self { face_down, face_up }
    }

    /// Total cards dealt to the pile.
    #[must_use]
    pub const fn total(self) -> usize {
        self.face_down + self.face_up
    }
}

/// Complete layout and scoring configuration for one variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Registry name, also the persisted `game.name`.
    pub name: String,

    /// Player-facing rules summary.
    pub help: String,

    /// Number of 52-card decks shuffled together.
    pub decks: usize,

    /// Deal depth per tableau pile; its length is the tableau count.
    pub tableau_depth: Vec<DealDepth>,

    /// Number of waste piles. Index 0 is the stock when present.
    pub num_waste: usize,

    /// Face-down cards dealt to `waste0`.
    pub stock_size: usize,

    /// Cards turned from stock to waste per deal.
    pub deal_by: usize,

    /// Points per card landing on a foundation.
    pub foundation_points: i32,
}

impl VariantConfig {
    /// Create a single-deck configuration with no piles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            decks: 1,
            tableau_depth: Vec::new(),
            num_waste: 0,
            stock_size: 0,
            deal_by: 1,
            foundation_points: DEFAULT_FOUNDATION_POINTS,
        }
    }

    /// Set the help text.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Set the number of decks.
    #[must_use]
    pub fn with_decks(mut self, decks: usize) -> Self {
        assert!(decks > 0, "Must have at least 1 deck");
        self.decks = decks;
        self
    }

    /// Add a tableau pile with the given deal depth.
    #[must_use]
    pub fn with_tableau(mut self, face_down: usize, face_up: usize) -> Self {
        self.tableau_depth.push(DealDepth::new(face_down, face_up));
        self
    }

    /// Add a stock pile (`waste0`) of `stock_size` cards and a face-up waste
    /// pile (`waste1`), turning `deal_by` cards per deal.
    #[must_use]
    pub fn with_stock(mut self, stock_size: usize, deal_by: usize) -> Self {
        assert!(deal_by > 0, "deal_by must be at least 1");
        self.num_waste = 2;
        self.stock_size = stock_size;
        self.deal_by = deal_by;
        self
    }

    /// Set points per foundation card.
    #[must_use]
    pub fn with_foundation_points(mut self, points: i32) -> Self {
        self.foundation_points = points;
        self
    }

    /// Number of tableau piles.
    #[must_use]
    pub fn num_tableau(&self) -> usize {
        self.tableau_depth.len()
    }

    /// Number of foundation piles: one per suit per deck.
    #[must_use]
    pub fn num_foundation(&self) -> usize {
        Suit::ALL.len() * self.decks
    }

    /// Suit built on foundation `index`.
    #[must_use]
    pub fn foundation_suit(&self, index: usize) -> Suit {
        Suit::ALL[index % Suit::ALL.len()]
    }

    /// Total cards in play.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        CARDS_PER_DECK * self.decks
    }

    /// Cards consumed by the initial deal.
    #[must_use]
    pub fn dealt_cards(&self) -> usize {
        self.tableau_depth.iter().map(|d| d.total()).sum::<usize>() + self.stock_size
    }

    /// Score reached when every card is on a foundation.
    #[must_use]
    pub fn max_score(&self) -> i32 {
        self.foundation_points * self.total_cards() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = VariantConfig::new("Test")
            .with_help("rules")
            .with_tableau(0, 1)
            .with_tableau(1, 1)
            .with_stock(10, 3)
            .with_foundation_points(5);

        assert_eq!(config.name, "Test");
        assert_eq!(config.help, "rules");
        assert_eq!(config.num_tableau(), 2);
        assert_eq!(config.num_waste, 2);
        assert_eq!(config.deal_by, 3);
        assert_eq!(config.dealt_cards(), 13);
        assert_eq!(config.max_score(), 5 * 52);
    }

    #[test]
    fn test_foundations() {
        let config = VariantConfig::new("Double").with_decks(2);
        assert_eq!(config.num_foundation(), 8);
        assert_eq!(config.foundation_suit(0), Suit::Spades);
        assert_eq!(config.foundation_suit(5), Suit::Hearts);
        assert_eq!(config.total_cards(), 104);
        assert_eq!(config.max_score(), DEFAULT_FOUNDATION_POINTS * 104);
    }

    #[test]
    #[should_panic(expected = "deal_by must be at least 1")]
    fn test_zero_deal_by() {
        let _ = VariantConfig::new("Bad").with_stock(24, 0);
    }
}
