//! Pile: an ordered stack of runs with type-specific placement rules.
//!
//! ## Runs
//!
//! A pile stores runs bottom to top in placement order. Its flattened card
//! sequence is every run's cards concatenated. Runs form when a face-up card
//! is allowed to join the face-up run below it; they are split when the
//! player grabs only part of the top run.
//!
//! ## Empty base
//!
//! An empty pile still has a position and build rules (the empty-slot base
//! rank). The pile itself plays that role, so `runs` is simply empty and
//! `top_card` is `None`.

use serde::{Deserialize, Serialize};

use super::id::{PileId, PileKind};
use super::run::Run;
use crate::core::{Card, CardExport, EngineError, Rank, Result, Suit};
use crate::rules::RulePolicy;

/// Orientation side effects applied while moving cards between piles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFlags {
    /// Turn the source's newly exposed top run face up afterwards.
    pub expose: bool,
    /// Turn the destination's top run face down before adding.
    pub cover: bool,
    /// Toggle orientation of every moved card.
    pub flip: bool,
}

/// An ordered stack of cards grouped into runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pile {
    id: PileId,
    suit: Option<Suit>,
    runs: Vec<Run>,
    size: usize,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(id: PileId, suit: Option<Suit>) -> Self {
        Self {
            id,
            suit,
            runs: Vec::new(),
            size: 0,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> PileId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.id.kind
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.id.index
    }

    /// Suit built on this pile (foundations only).
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }

    /// Total card count across runs.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Runs, bottom to top.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Topmost run.
    #[must_use]
    pub fn top_run(&self) -> Option<&Run> {
        self.runs.last()
    }

    /// Top card of the topmost run.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.runs.last().and_then(Run::top_card)
    }

    /// Bottom card of the bottommost run.
    #[must_use]
    pub fn bottom_card(&self) -> Option<Card> {
        self.runs.first().and_then(Run::bottom_card)
    }

    /// Flattened cards, bottom to top.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.runs.iter().flat_map(|r| r.cards().iter().copied()).collect()
    }

    /// The top `count` cards of the top run, bottom to top.
    ///
    /// Returns `None` if the top run holds fewer than `count` cards.
    #[must_use]
    pub fn top_group(&self, count: usize) -> Option<&[Card]> {
        let run = self.runs.last()?;
        let cards = run.cards();
        if count == 0 || count > cards.len() {
            return None;
        }
        Some(&cards[cards.len() - count..])
    }

    // === Build rules ===

    /// Same-suit rank rule.
    ///
    /// On an empty pile only `base` is accepted (any rank if `base` is
    /// `None`). Otherwise `card` must be `order` steps from the top card.
    #[must_use]
    pub fn by_rank(&self, card: Card, base: Option<Rank>, order: i8, suit: Option<Suit>, wrap: bool) -> bool {
        if suit.is_some_and(|s| card.suit != s) {
            return false;
        }
        match self.top_card() {
            None => base.map_or(true, |b| card.rank == b),
            Some(top) => top.next_rank(order, wrap) == Some(card.rank),
        }
    }

    /// Alternate-colour rank rule.
    ///
    /// On an empty pile only `base` is accepted. Otherwise `card` must differ
    /// in colour from the top card and be `order` steps from it.
    #[must_use]
    pub fn by_alt_color(&self, card: Card, base: Option<Rank>, order: i8, wrap: bool) -> bool {
        match self.top_card() {
            None => base.map_or(true, |b| card.rank == b),
            Some(top) => card.color() != top.color() && top.next_rank(order, wrap) == Some(card.rank),
        }
    }

    // === Mutation ===

    /// Add one card on top.
    ///
    /// A face-up card joins the top run when the pile is not a waste pile,
    /// the top run is face up, and the rules allow the join. Otherwise it
    /// starts a new run.
    pub fn add_card(&mut self, card: Card, rules: &dyn RulePolicy) {
        let joins = card.faceup
            && self.kind() != PileKind::Waste
            && self.top_run().is_some_and(Run::is_faceup)
            && rules.can_join(self, card);

        match self.runs.last_mut() {
            Some(top) if joins => top.push(card),
            _ => self.runs.push(Run::new(card)),
        }
        self.size += 1;
    }

    /// Add cards in order, optionally forcing their orientation.
    ///
    /// Returns the number of cards added.
    pub fn add_cards<I>(&mut self, cards: I, faceup: Option<bool>, rules: &dyn RulePolicy) -> usize
    where
        I: IntoIterator<Item = Card>,
    {
        let mut added = 0;
        for card in cards {
            let card = faceup.map_or(card, |up| card.with_faceup(up));
            self.add_card(card, rules);
            added += 1;
        }
        added
    }

    /// Pop the entire topmost run. Empty if the pile is empty.
    pub fn remove_cards(&mut self) -> Vec<Card> {
        match self.runs.pop() {
            Some(run) => {
                self.size -= run.len();
                run.into_cards().into_vec()
            }
            None => Vec::new(),
        }
    }

    /// Remove the topmost run, optionally flipping its cards and exposing
    /// the run beneath.
    pub fn take_cards(&mut self, expose: bool, flip: bool, rules: &dyn RulePolicy) -> Vec<Card> {
        let mut cards = self.remove_cards();
        if flip {
            for card in &mut cards {
                *card = card.flipped();
            }
        }
        if expose {
            self.expose_top(rules);
        }
        cards
    }

    /// Move the topmost run onto `dest`. Returns the number of cards moved.
    pub fn move_cards_to(&mut self, dest: &mut Pile, flags: MoveFlags, rules: &dyn RulePolicy) -> usize {
        let cards = self.take_cards(flags.expose, flags.flip, rules);
        if flags.cover {
            dest.cover_top(rules);
        }
        dest.add_cards(cards, None, rules)
    }

    /// Move exactly `total` cards onto `dest`, splitting the top run where
    /// needed.
    ///
    /// Whole runs are moved while they fit; the next run is then split so
    /// its top part holds exactly the remainder. `cover` is applied to
    /// `dest` once before the first card lands and `expose` to this pile once
    /// after the last card leaves.
    ///
    /// Returns `false` without changing either pile if this pile holds fewer
    /// than `total` cards.
    pub fn move_num_cards_to(&mut self, dest: &mut Pile, total: usize, flags: MoveFlags, rules: &dyn RulePolicy) -> bool {
        if total == 0 || total > self.size {
            log::warn!("cannot move {} of {} cards from {}", total, self.size, self.id);
            return false;
        }

        if flags.cover {
            dest.cover_top(rules);
        }

        let step = MoveFlags {
            flip: flags.flip,
            ..MoveFlags::default()
        };
        let mut moved = 0;
        while moved < total {
            let num = self.runs.last().map_or(0, Run::len);
            if moved + num <= total {
                moved += self.move_cards_to(dest, step, rules);
            } else if !self.split_top_widget(total - moved) {
                // Unreachable after the size check above.
                return false;
            }
        }

        if flags.expose {
            self.expose_top(rules);
        }
        true
    }

    /// Split the top run so its top `selected` cards form their own run.
    ///
    /// The bottom `run_size - selected` cards become a new run placed
    /// directly beneath. Fails if `selected` is not smaller than the run.
    pub fn split_top_widget(&mut self, selected: usize) -> bool {
        let Some(top) = self.runs.last_mut() else {
            return false;
        };
        if selected == 0 || top.len() <= selected {
            log::debug!("can't split {} out of {} on {}", selected, top.len(), self.id);
            return false;
        }
        let under_count = top.len() - selected;
        let Some(under) = top.split_bottom(under_count) else {
            return false;
        };
        let at = self.runs.len() - 1;
        self.runs.insert(at, under);
        true
    }

    /// Turn the top run face up, re-adding it through the join logic.
    pub fn expose_top(&mut self, rules: &dyn RulePolicy) {
        if self.is_empty() {
            return;
        }
        let cards = self.remove_cards();
        self.add_cards(cards, Some(true), rules);
    }

    /// Turn the top run face down.
    pub fn cover_top(&mut self, rules: &dyn RulePolicy) {
        if self.is_empty() {
            return;
        }
        let cards = self.remove_cards();
        self.add_cards(cards, Some(false), rules);
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.size = 0;
    }

    // === Persistence ===

    /// Flatten all runs to a card export list, bottom to top.
    #[must_use]
    pub fn save(&self) -> Vec<CardExport> {
        self.runs
            .iter()
            .flat_map(|r| r.cards().iter().map(|c| c.export()))
            .collect()
    }

    /// Replace the contents with exported cards, re-adding them one at a time
    /// so run boundaries are rebuilt by the join rules.
    ///
    /// The pile is left untouched if any card fails to import.
    pub fn load(&mut self, data: &[CardExport], rules: &dyn RulePolicy) -> Result<usize> {
        let cards = data
            .iter()
            .map(|&c| Card::import(c))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| EngineError::CorruptSaveData(format!("bad card in {}", self.id)))?;

        self.clear();
        Ok(self.add_cards(cards, None, rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ACE, KING};
    use crate::games::{Klondike, Yukon};

    fn up(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank).flipped()
    }

    fn down(suit: Suit, rank: u8) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_by_rank_empty_foundation() {
        let pile = Pile::new(PileId::foundation(0), Some(Suit::Spades));
        assert!(pile.by_rank(up(Suit::Spades, ACE), Some(ACE), 1, Some(Suit::Spades), false));
        assert!(!pile.by_rank(up(Suit::Spades, 2), Some(ACE), 1, Some(Suit::Spades), false));
        assert!(!pile.by_rank(up(Suit::Hearts, ACE), Some(ACE), 1, Some(Suit::Spades), false));
    }

    #[test]
    fn test_by_rank_building() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::foundation(0), Some(Suit::Spades));
        pile.add_card(up(Suit::Spades, ACE), &rules);

        assert!(pile.by_rank(up(Suit::Spades, 2), Some(ACE), 1, Some(Suit::Spades), false));
        assert!(!pile.by_rank(up(Suit::Spades, 3), Some(ACE), 1, Some(Suit::Spades), false));
    }

    #[test]
    fn test_by_alt_color() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        assert!(pile.by_alt_color(up(Suit::Clubs, KING), Some(KING), -1, false));
        assert!(!pile.by_alt_color(up(Suit::Clubs, 6), Some(KING), -1, false));

        pile.add_card(up(Suit::Hearts, 7), &rules);
        assert!(pile.by_alt_color(up(Suit::Clubs, 6), Some(KING), -1, false));
        assert!(!pile.by_alt_color(up(Suit::Diamonds, 6), Some(KING), -1, false));
        assert!(!pile.by_alt_color(up(Suit::Clubs, 5), Some(KING), -1, false));
    }

    #[test]
    fn test_add_card_joins_legal_sequence() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        pile.add_card(down(Suit::Spades, 3), &rules);
        pile.add_card(up(Suit::Hearts, 9), &rules);
        pile.add_card(up(Suit::Clubs, 8), &rules);
        pile.add_card(up(Suit::Clubs, 7), &rules);

        assert_eq!(pile.size(), 4);
        assert_eq!(pile.runs().len(), 3);
        assert_eq!(pile.runs()[1].len(), 2);
        assert_eq!(pile.top_card(), Some(Card::new(Suit::Clubs, 7)));
        assert_eq!(pile.bottom_card(), Some(Card::new(Suit::Spades, 3)));
    }

    #[test]
    fn test_face_down_never_joins() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        pile.add_card(down(Suit::Hearts, 9), &rules);
        pile.add_card(down(Suit::Clubs, 8), &rules);
        assert_eq!(pile.runs().len(), 2);
    }

    #[test]
    fn test_waste_never_joins() {
        let rules = Yukon::default();
        let mut pile = Pile::new(PileId::waste(1), None);
        pile.add_card(up(Suit::Hearts, 9), &rules);
        pile.add_card(up(Suit::Clubs, 8), &rules);
        assert_eq!(pile.runs().len(), 2);
    }

    #[test]
    fn test_remove_cards_pops_whole_run() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        assert!(pile.remove_cards().is_empty());

        pile.add_card(up(Suit::Hearts, 9), &rules);
        pile.add_card(up(Suit::Clubs, 8), &rules);
        let cards = pile.remove_cards();
        assert_eq!(cards, vec![Card::new(Suit::Hearts, 9), Card::new(Suit::Clubs, 8)]);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_take_cards_expose_and_flip() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        pile.add_card(down(Suit::Spades, 2), &rules);
        pile.add_card(up(Suit::Hearts, 9), &rules);

        let taken = pile.take_cards(true, true, &rules);
        assert_eq!(taken.len(), 1);
        assert!(!taken[0].faceup);
        assert!(pile.top_card().unwrap().faceup);
    }

    #[test]
    fn test_split_top_widget() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        pile.add_card(up(Suit::Hearts, 9), &rules);
        pile.add_card(up(Suit::Clubs, 8), &rules);
        pile.add_card(up(Suit::Diamonds, 7), &rules);

        assert!(pile.split_top_widget(1));
        assert_eq!(pile.runs().len(), 2);
        assert_eq!(pile.runs()[0].len(), 2);
        assert_eq!(pile.runs()[1].cards(), &[Card::new(Suit::Diamonds, 7)]);
        assert_eq!(pile.size(), 3);
    }

    #[test]
    fn test_split_whole_run_fails() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        assert!(!pile.split_top_widget(1));

        pile.add_card(up(Suit::Hearts, 9), &rules);
        pile.add_card(up(Suit::Clubs, 8), &rules);
        let before = pile.clone();

        assert!(!pile.split_top_widget(2));
        assert!(!pile.split_top_widget(3));
        assert_eq!(pile, before);
    }

    #[test]
    fn test_move_num_cards_splits() {
        let rules = Klondike::default();
        let mut src = Pile::new(PileId::tableau(0), None);
        let mut dst = Pile::new(PileId::tableau(1), None);
        src.add_card(down(Suit::Spades, 1), &rules);
        src.add_card(up(Suit::Hearts, 9), &rules);
        src.add_card(up(Suit::Clubs, 8), &rules);
        src.add_card(up(Suit::Diamonds, 7), &rules);
        dst.add_card(up(Suit::Diamonds, 9), &rules);

        // Move 8c-7d onto 9d; 9h stays behind.
        assert!(src.move_num_cards_to(&mut dst, 2, MoveFlags::default(), &rules));
        assert_eq!(src.size(), 2);
        assert_eq!(src.top_card(), Some(Card::new(Suit::Hearts, 9)));
        assert_eq!(dst.size(), 3);
        assert_eq!(dst.runs().len(), 1);
        assert_eq!(dst.top_card(), Some(Card::new(Suit::Diamonds, 7)));
    }

    #[test]
    fn test_move_num_cards_too_many() {
        let rules = Klondike::default();
        let mut src = Pile::new(PileId::tableau(0), None);
        let mut dst = Pile::new(PileId::tableau(1), None);
        src.add_card(up(Suit::Hearts, 9), &rules);

        let before = (src.clone(), dst.clone());
        assert!(!src.move_num_cards_to(&mut dst, 2, MoveFlags::default(), &rules));
        assert_eq!((src, dst), before);
    }

    #[test]
    fn test_move_expose_then_cover_restores() {
        let rules = Klondike::default();
        let mut src = Pile::new(PileId::tableau(0), None);
        let mut dst = Pile::new(PileId::tableau(1), None);
        src.add_card(down(Suit::Spades, 4), &rules);
        src.add_card(up(Suit::Hearts, 9), &rules);
        dst.add_card(up(Suit::Spades, 10), &rules);
        let before = (src.cards(), dst.cards());
        let before_up: Vec<bool> = src.cards().iter().map(|c| c.faceup).collect();

        let expose = MoveFlags {
            expose: true,
            ..MoveFlags::default()
        };
        assert!(src.move_num_cards_to(&mut dst, 1, expose, &rules));
        assert!(src.top_card().unwrap().faceup);

        let cover = MoveFlags {
            cover: true,
            ..MoveFlags::default()
        };
        assert!(dst.move_num_cards_to(&mut src, 1, cover, &rules));
        assert_eq!((src.cards(), dst.cards()), before);
        let after_up: Vec<bool> = src.cards().iter().map(|c| c.faceup).collect();
        assert_eq!(after_up, before_up);
    }

    #[test]
    fn test_flip_moves_reverse_card_order() {
        let rules = Klondike::default();
        let mut stock = Pile::new(PileId::waste(0), None);
        let mut waste = Pile::new(PileId::waste(1), None);
        for rank in 1..=3 {
            stock.add_card(down(Suit::Clubs, rank), &rules);
        }
        let flip = MoveFlags {
            flip: true,
            ..MoveFlags::default()
        };

        assert!(stock.move_num_cards_to(&mut waste, 3, flip, &rules));
        assert_eq!(waste.top_card(), Some(Card::new(Suit::Clubs, 1)));
        assert!(waste.cards().iter().all(|c| c.faceup));

        assert!(waste.move_num_cards_to(&mut stock, 3, flip, &rules));
        assert_eq!(stock.top_card(), Some(Card::new(Suit::Clubs, 3)));
        assert!(stock.cards().iter().all(|c| !c.faceup));
    }

    #[test]
    fn test_save_load() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(2), None);
        pile.add_card(down(Suit::Spades, 4), &rules);
        pile.add_card(up(Suit::Hearts, 9), &rules);
        pile.add_card(up(Suit::Clubs, 8), &rules);

        let data = pile.save();
        assert_eq!(data[0], (Suit::Spades, 4, false));

        let mut restored = Pile::new(PileId::tableau(2), None);
        assert_eq!(restored.load(&data, &rules), Ok(3));
        assert_eq!(restored, pile);
    }

    #[test]
    fn test_load_rejects_bad_card() {
        let rules = Klondike::default();
        let mut pile = Pile::new(PileId::tableau(0), None);
        pile.add_card(up(Suit::Hearts, 9), &rules);

        let result = pile.load(&[(Suit::Spades, 20, true)], &rules);
        assert!(matches!(result, Err(EngineError::CorruptSaveData(_))));
        assert_eq!(pile.size(), 1);
    }
}
