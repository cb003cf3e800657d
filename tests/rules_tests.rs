//! Build rule and rule policy integration tests.
//!
//! These tests exercise the shared foundation/tableau legality through
//! the public pile and policy APIs.

use solitaire_engine::core::{Card, Suit, ACE, KING};
use solitaire_engine::games::{Klondike, Yukon};
use solitaire_engine::piles::{Pile, PileId};
use solitaire_engine::rules::{RulePolicy, VariantRegistry};

fn up(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank).flipped()
}

// =============================================================================
// Build Rule Tests
// =============================================================================

/// An empty foundation takes only its base rank.
#[test]
fn test_foundation_starts_with_ace() {
    let pile = Pile::new(PileId::foundation(0), Some(Suit::Spades));

    assert!(pile.by_rank(up(Suit::Spades, ACE), Some(ACE), 1, Some(Suit::Spades), false));
    assert!(!pile.by_rank(up(Suit::Spades, 2), Some(ACE), 1, Some(Suit::Spades), false));
}

/// A tableau builds down in alternating colours.
#[test]
fn test_tableau_alternate_color() {
    let rules = Klondike::default();
    let mut pile = Pile::new(PileId::tableau(0), None);
    pile.add_card(up(Suit::Hearts, 7), &rules);

    assert!(pile.by_alt_color(up(Suit::Clubs, 6), Some(KING), -1, false));
    assert!(!pile.by_alt_color(up(Suit::Diamonds, 6), Some(KING), -1, false));
}

/// Wrapping lets a King follow an Ace on a descending build.
#[test]
fn test_wrapping_build() {
    let rules = Klondike::default();
    let mut pile = Pile::new(PileId::tableau(0), None);
    pile.add_card(up(Suit::Hearts, ACE), &rules);

    assert!(!pile.by_alt_color(up(Suit::Spades, KING), None, -1, false));
    assert!(pile.by_alt_color(up(Suit::Spades, KING), None, -1, true));
}

// =============================================================================
// Rule Policy Tests
// =============================================================================

/// `can_add` answers the same way every time and leaves piles alone.
#[test]
fn test_can_add_is_pure() {
    let rules = Klondike::default();
    let mut src = Pile::new(PileId::tableau(1), None);
    src.add_card(up(Suit::Clubs, 6), &rules);
    let mut dst = Pile::new(PileId::tableau(0), None);
    dst.add_card(up(Suit::Hearts, 7), &rules);
    let before = (src.clone(), dst.clone());

    let group = [up(Suit::Clubs, 6)];
    let first = rules.can_add(Some(&src), &dst, &group, 1);
    for _ in 0..10 {
        assert_eq!(rules.can_add(Some(&src), &dst, &group, 1), first);
    }
    assert!(first);
    assert_eq!((src, dst), before);
}

/// Foundations take one card at a time, in suit.
#[test]
fn test_foundation_takes_single_cards() {
    let rules = Klondike::default();
    let mut foundation = Pile::new(PileId::foundation(1), Some(Suit::Hearts));
    foundation.add_card(up(Suit::Hearts, ACE), &rules);

    assert!(rules.can_add(None, &foundation, &[up(Suit::Hearts, 2)], 1));
    assert!(!rules.can_add(None, &foundation, &[up(Suit::Diamonds, 2)], 1));
    let pair = [up(Suit::Hearts, 2), up(Suit::Hearts, 3)];
    assert!(!rules.can_add(None, &foundation, &pair, 2));
}

/// Only a King may fill an empty tableau.
#[test]
fn test_empty_tableau_takes_king() {
    let rules = Klondike::default();
    let empty = Pile::new(PileId::tableau(3), None);

    assert!(rules.can_add(None, &empty, &[up(Suit::Diamonds, KING)], 1));
    assert!(!rules.can_add(None, &empty, &[up(Suit::Diamonds, 12)], 1));
}

/// Nothing may be played onto a waste pile.
#[test]
fn test_waste_rejects_everything() {
    let rules = Klondike::default();
    let waste = Pile::new(PileId::waste(1), None);
    assert!(!rules.can_add(None, &waste, &[up(Suit::Clubs, KING)], 1));
}

/// In Yukon an unordered face-up group moves on its lowest card.
#[test]
fn test_yukon_unordered_group() {
    let rules = Yukon::default();
    let mut dst = Pile::new(PileId::tableau(0), None);
    dst.add_card(up(Suit::Spades, 9), &rules);

    let group = [up(Suit::Diamonds, 8), up(Suit::Clubs, 3), up(Suit::Hearts, 12)];
    assert!(rules.can_add(None, &dst, &group, 3));
}

// =============================================================================
// Registry Tests
// =============================================================================

/// Every registered variant deals exactly one deck.
#[test]
fn test_registered_variants_deal_whole_deck() {
    let registry = VariantRegistry::standard();
    for name in registry.names() {
        let rules = registry.create(name).unwrap();
        let config = rules.config();
        assert_eq!(config.dealt_cards(), config.total_cards(), "{}", name);
        assert!(!config.help.is_empty());
    }
}
