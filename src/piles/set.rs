//! Pile set: every pile of a layout, addressable by id.
//!
//! Piles live in a `Vec` in layout order (tableau, foundation, waste) with an
//! `FxHashMap` index, so two distinct piles can be borrowed mutably at once
//! for a transfer.

use rustc_hash::FxHashMap;

use super::id::{PileId, PileKind};
use super::pile::Pile;
use crate::core::{Card, VariantConfig};

/// All piles of one game layout.
#[derive(Clone, Debug, Default)]
pub struct PileSet {
    piles: Vec<Pile>,
    index: FxHashMap<PileId, usize>,
}

impl PileSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the empty layout described by a variant configuration.
    #[must_use]
    pub fn from_config(config: &VariantConfig) -> Self {
        let mut set = Self::new();
        for i in 0..config.num_tableau() {
            set.insert(Pile::new(PileId::tableau(i), None));
        }
        for i in 0..config.num_foundation() {
            set.insert(Pile::new(PileId::foundation(i), Some(config.foundation_suit(i))));
        }
        for i in 0..config.num_waste {
            set.insert(Pile::new(PileId::waste(i), None));
        }
        set
    }

    /// Add a pile.
    ///
    /// Panics if a pile with the same id already exists.
    pub fn insert(&mut self, pile: Pile) {
        let id = pile.id();
        if self.index.contains_key(&id) {
            panic!("Pile {} already exists in pile set", id);
        }
        self.index.insert(id, self.piles.len());
        self.piles.push(pile);
    }

    /// Get a pile by id.
    #[must_use]
    pub fn get(&self, id: PileId) -> Option<&Pile> {
        self.index.get(&id).map(|&i| &self.piles[i])
    }

    /// Get a mutable pile by id.
    pub fn get_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        let i = *self.index.get(&id)?;
        Some(&mut self.piles[i])
    }

    /// Borrow two distinct piles mutably.
    ///
    /// Returns `None` if either id is unknown or both are the same pile.
    pub fn pair_mut(&mut self, a: PileId, b: PileId) -> Option<(&mut Pile, &mut Pile)> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        if ia == ib {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.piles.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.piles.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    #[must_use]
    pub fn contains(&self, id: PileId) -> bool {
        self.index.contains_key(&id)
    }

    /// Iterate piles in layout order.
    pub fn iter(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }

    /// Iterate piles mutably in layout order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pile> {
        self.piles.iter_mut()
    }

    /// Iterate piles of one kind, in index order.
    pub fn of_kind(&self, kind: PileKind) -> impl Iterator<Item = &Pile> {
        self.piles.iter().filter(move |p| p.kind() == kind)
    }

    /// Number of piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.iter().map(Pile::size).sum()
    }

    /// Empty every pile.
    pub fn clear(&mut self) {
        for pile in &mut self.piles {
            pile.clear();
        }
    }

    /// Flattened contents of every pile, keyed by id in layout order.
    #[must_use]
    pub fn contents(&self) -> Vec<(PileId, Vec<Card>)> {
        self.piles.iter().map(|p| (p.id(), p.cards())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    #[test]
    fn test_from_config() {
        let config = VariantConfig::new("T").with_tableau(0, 1).with_tableau(1, 1).with_stock(24, 3);
        let set = PileSet::from_config(&config);

        assert_eq!(set.len(), 2 + 4 + 2);
        assert_eq!(set.of_kind(PileKind::Tableau).count(), 2);
        assert_eq!(set.get(PileId::foundation(1)).unwrap().suit(), Some(Suit::Hearts));
        assert!(set.contains(PileId::waste(1)));
        assert!(!set.contains(PileId::waste(2)));
    }

    #[test]
    fn test_pair_mut() {
        let config = VariantConfig::new("T").with_tableau(0, 1).with_tableau(0, 1);
        let mut set = PileSet::from_config(&config);

        let (a, b) = set.pair_mut(PileId::foundation(3), PileId::tableau(1)).unwrap();
        assert_eq!(a.id(), PileId::foundation(3));
        assert_eq!(b.id(), PileId::tableau(1));

        assert!(set.pair_mut(PileId::tableau(0), PileId::tableau(0)).is_none());
        assert!(set.pair_mut(PileId::tableau(0), PileId::waste(0)).is_none());
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_duplicate_pile_panics() {
        let mut set = PileSet::new();
        set.insert(Pile::new(PileId::tableau(0), None));
        set.insert(Pile::new(PileId::tableau(0), None));
    }
}
