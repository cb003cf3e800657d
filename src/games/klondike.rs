//! Klondike: the classic stock-and-waste patience.

use crate::core::{Card, VariantConfig};
use crate::engine::Move;
use crate::piles::{Pile, PileId, PileSet};
use crate::rules::{standard_can_add, RulePolicy};

const HELP: &str = "\
Foundations build up in suit from Ace to King.

Tableau piles build down in alternating colours. Only a King, or a \
sequence headed by a King, may fill an empty tableau pile.

Deal from the stock onto the waste. When the stock runs out, dealing \
turns the waste back over; redeals are unlimited. Cards may be played \
back from the foundations one at a time.";

/// Cards left in the stock after the tableau deal.
const STOCK_SIZE: usize = 24;

/// Klondike rule policy.
///
/// `waste0` is the face-down stock, `waste1` the face-up waste.
#[derive(Clone, Debug)]
pub struct Klondike {
    config: VariantConfig,
}

impl Klondike {
    /// Klondike turning `deal_by` cards per deal.
    #[must_use]
    pub fn new(name: &str, deal_by: usize) -> Self {
        let mut config = VariantConfig::new(name).with_help(HELP);
        for i in 0..7 {
            config = config.with_tableau(i, 1);
        }
        Self {
            config: config.with_stock(STOCK_SIZE, deal_by),
        }
    }

    /// Klondike turning one card per deal.
    #[must_use]
    pub fn draw_one() -> Self {
        Self::new("Klondike Draw One", 1)
    }

    fn stock(piles: &PileSet) -> Option<&Pile> {
        piles.get(PileId::waste(0))
    }

    fn waste(piles: &PileSet) -> Option<&Pile> {
        piles.get(PileId::waste(1))
    }

    fn turn_count(&self, stock: &Pile) -> usize {
        self.config.deal_by.min(stock.size())
    }
}

impl Default for Klondike {
    /// Klondike turning three cards per deal.
    fn default() -> Self {
        Self::new("Klondike", 3)
    }
}

impl RulePolicy for Klondike {
    fn config(&self) -> &VariantConfig {
        &self.config
    }

    fn can_add(&self, src: Option<&Pile>, dst: &Pile, group: &[Card], count: usize) -> bool {
        standard_can_add(src, dst, group, count)
    }

    fn on_deal(&self, piles: &PileSet) -> Option<Move> {
        let stock = Self::stock(piles)?;
        let waste = Self::waste(piles)?;

        if !stock.is_empty() {
            let count = self.turn_count(stock);
            log::debug!("deal {} card(s) onto the waste", count);
            Some(Move::new(stock.id(), waste.id(), count).with_flip())
        } else if !waste.is_empty() {
            log::debug!("pick up {} card(s) from the waste", waste.size());
            Some(Move::new(waste.id(), stock.id(), waste.size()).with_flip().appended())
        } else {
            None
        }
    }

    fn on_moved(&self, piles: &PileSet) -> Option<Move> {
        let stock = Self::stock(piles)?;
        let waste = Self::waste(piles)?;

        if waste.is_empty() && !stock.is_empty() {
            let count = self.turn_count(stock);
            Some(Move::new(stock.id(), waste.id(), count).with_flip().appended())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, Suit};
    use crate::rules::deal_all;

    fn dealt(rules: &Klondike) -> PileSet {
        let mut piles = PileSet::from_config(rules.config());
        let mut deck = Deck::with_seed(1, 11);
        deck.shuffle();
        deal_all(rules, &mut piles, &mut deck).unwrap();
        piles
    }

    #[test]
    fn test_layout() {
        let rules = Klondike::default();
        let config = rules.config();
        assert_eq!(config.num_tableau(), 7);
        assert_eq!(config.num_waste, 2);
        assert_eq!(config.deal_by, 3);
        assert_eq!(config.dealt_cards(), 52);
        assert_eq!(rules.max_score(), 520);
    }

    #[test]
    fn test_initial_deal() {
        let rules = Klondike::default();
        let piles = dealt(&rules);

        for i in 0..7 {
            let pile = piles.get(PileId::tableau(i)).unwrap();
            assert_eq!(pile.size(), i + 1);
            assert!(pile.top_card().unwrap().faceup);
            assert_eq!(pile.cards().iter().filter(|c| c.faceup).count(), 1);
        }
        assert_eq!(piles.get(PileId::waste(0)).unwrap().size(), 24);
        assert!(piles.get(PileId::waste(1)).unwrap().is_empty());
        assert_eq!(piles.total_cards(), 52);
    }

    #[test]
    fn test_on_deal_turns_stock() {
        let rules = Klondike::default();
        let piles = dealt(&rules);

        let mv = rules.on_deal(&piles).unwrap();
        assert_eq!(mv.src, PileId::waste(0));
        assert_eq!(mv.dst, PileId::waste(1));
        assert_eq!(mv.count, 3);
        assert!(mv.flip);
        assert!(!mv.append);
    }

    #[test]
    fn test_on_deal_redeals_waste() {
        let rules = Klondike::default();
        let mut piles = dealt(&rules);
        let (stock, waste) = piles.pair_mut(PileId::waste(0), PileId::waste(1)).unwrap();
        stock.move_num_cards_to(waste, 24, crate::piles::MoveFlags::default(), &rules);

        let mv = rules.on_deal(&piles).unwrap();
        assert_eq!(mv.src, PileId::waste(1));
        assert_eq!(mv.dst, PileId::waste(0));
        assert_eq!(mv.count, 24);
        assert!(mv.flip && mv.append);
    }

    #[test]
    fn test_on_deal_nothing_left() {
        let rules = Klondike::default();
        let piles = PileSet::from_config(rules.config());
        assert!(rules.on_deal(&piles).is_none());
    }

    #[test]
    fn test_on_moved_refills_empty_waste() {
        let rules = Klondike::draw_one();
        let piles = dealt(&rules);

        let mv = rules.on_moved(&piles).unwrap();
        assert_eq!(mv.count, 1);
        assert!(mv.append);

        let mut piles = piles;
        let waste = piles.get_mut(PileId::waste(1)).unwrap();
        waste.add_card(Card::new(Suit::Hearts, 4).flipped(), &rules);
        assert!(rules.on_moved(&piles).is_none());
    }
}
