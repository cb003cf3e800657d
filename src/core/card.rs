//! Card identity: suit, rank and orientation.
//!
//! A `Card` is immutable apart from its `faceup` flag. Equality only looks at
//! suit and rank, so a card keeps its identity when it is turned over.
//!
//! ## Export format
//!
//! Cards persist as a `(suit, rank, faceup)` tuple:
//!
//! ```
//! use solitaire_engine::core::{Card, Suit};
//!
//! let card = Card::new(Suit::Hearts, 7).flipped();
//! let json = serde_json::to_string(&card.export()).unwrap();
//! assert_eq!(json, r#"["hearts",7,true]"#);
//! ```

use serde::{Deserialize, Serialize};

/// Rank value. Ace is 1, King is 13.
pub type Rank = u8;

/// Rank of an Ace.
pub const ACE: Rank = 1;
/// Rank of a King.
pub const KING: Rank = 13;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All four suits, in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Colour of this suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    /// Single-character symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }
}

/// Card colour, used by alternate-colour build rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Persisted form of a card: `(suit, rank, faceup)`.
pub type CardExport = (Suit, Rank, bool);

/// A playing card.
#[derive(Clone, Copy, Debug, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    pub faceup: bool,
}

impl Card {
    /// Create a face-down card.
    ///
    /// Panics if `rank` is outside `1..=13`.
    #[must_use]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        assert!((ACE..=KING).contains(&rank), "Rank must be 1-13, got {}", rank);
        Self {
            suit,
            rank,
            faceup: false,
        }
    }

    /// Same card with the given orientation.
    #[must_use]
    pub const fn with_faceup(mut self, faceup: bool) -> Self {
        self.faceup = faceup;
        self
    }

    /// Same card turned over.
    #[must_use]
    pub const fn flipped(self) -> Self {
        self.with_faceup(!self.faceup)
    }

    /// Colour of the card's suit.
    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Rank `order` steps away (`+1` ascending, `-1` descending).
    ///
    /// Without `wrap`, stepping past Ace or King yields `None`. With `wrap`,
    /// King is followed by Ace and vice versa.
    ///
    /// ```
    /// use solitaire_engine::core::{Card, Suit};
    ///
    /// let king = Card::new(Suit::Spades, 13);
    /// assert_eq!(king.next_rank(1, false), None);
    /// assert_eq!(king.next_rank(1, true), Some(1));
    /// assert_eq!(king.next_rank(-1, false), Some(12));
    /// ```
    #[must_use]
    pub fn next_rank(self, order: i8, wrap: bool) -> Option<Rank> {
        let next = self.rank as i16 + order as i16;
        if (ACE as i16..=KING as i16).contains(&next) {
            Some(next as Rank)
        } else if wrap {
            Some((next - 1).rem_euclid(KING as i16) as Rank + 1)
        } else {
            None
        }
    }

    /// Export as a `(suit, rank, faceup)` tuple.
    #[must_use]
    pub const fn export(self) -> CardExport {
        (self.suit, self.rank, self.faceup)
    }

    /// Rebuild a card from its export tuple.
    ///
    /// Returns `None` for an out-of-range rank.
    #[must_use]
    pub fn import(data: CardExport) -> Option<Self> {
        let (suit, rank, faceup) = data;
        if !(ACE..=KING).contains(&rank) {
            return None;
        }
        Some(Self { suit, rank, faceup })
    }

    /// Short label, e.g. `"7h"` or `"Ks"`.
    #[must_use]
    pub fn label(self) -> String {
        let rank = match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        };
        format!("{}{}", rank, self.suit.symbol())
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.faceup {
            write!(f, "{}", self.label())
        } else {
            write!(f, "[{}]", self.label())
        }
    }
}
