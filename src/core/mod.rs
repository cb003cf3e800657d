//! Core engine types: cards, decks, RNG, variant configuration, errors.
//!
//! This module contains the fundamental building blocks that are
//! variant-agnostic. Variants configure these via `VariantConfig` rather
//! than modifying the core.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod rng;

pub use card::{Card, CardExport, Color, Rank, Suit, ACE, KING};
pub use config::{DealDepth, VariantConfig, DEFAULT_FOUNDATION_POINTS};
pub use deck::{Deck, DeckState, CARDS_PER_DECK};
pub use error::{EngineError, Result};
pub use rng::{GameRng, GameRngState};
