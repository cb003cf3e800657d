//! Yukon: every card dealt to the tableau, any face-up group movable.

use crate::core::{Card, VariantConfig};
use crate::piles::{Pile, PileKind};
use crate::rules::{standard_can_add, RulePolicy};

const HELP: &str = "\
Foundations build up in suit from Ace to King.

Tableau piles build down in alternating colours. Any face-up group may \
be moved, ordered or not, as long as its lowest card builds on the top \
card of the destination. An empty tableau pile takes only a group headed \
by a King. Cards may be played back from the foundations one at a time.";

/// Yukon rule policy.
#[derive(Clone, Debug)]
pub struct Yukon {
    config: VariantConfig,
}

impl Default for Yukon {
    fn default() -> Self {
        let mut config = VariantConfig::new("Yukon").with_help(HELP).with_tableau(0, 1);
        for i in 1..7 {
            config = config.with_tableau(i, 5);
        }
        Self { config }
    }
}

impl RulePolicy for Yukon {
    fn config(&self) -> &VariantConfig {
        &self.config
    }

    fn can_add(&self, src: Option<&Pile>, dst: &Pile, group: &[Card], count: usize) -> bool {
        standard_can_add(src, dst, group, count)
    }

    /// Face-up tableau cards always form one run, so any face-up group can
    /// be picked up by splitting it.
    fn can_join(&self, pile: &Pile, card: Card) -> bool {
        match pile.kind() {
            PileKind::Tableau => card.faceup,
            _ => self.can_add(None, pile, &[card], 1),
        }
    }
}
