//! Game session: one variant's piles, deck, log and score.
//!
//! `GameSession` is the entry point for playing a game. It owns the state a
//! `MoveEngine` works on and layers the session concerns on top:
//!
//! - running variant hooks after each move until they settle
//! - the undo log, redo and seeking
//! - scoring, win detection and per-variant statistics
//! - writing every change through to an attached `KeyValueStore`
//! - notifying an attached `MoveObserver`

use serde::Serialize;

use super::snapshot::Snapshot;
use super::stats::VariantStats;
use super::store::{get_parsed, get_required, KeyValueStore, GAME_SECTION, MOVES_SECTION, PILES_SECTION};
use crate::core::{CardExport, Deck, DeckState, EngineError, Rank, Result, Suit};
use crate::engine::{LogEntry, Move, MoveEngine, MoveEvent, MoveLog, MoveObserver, MoveRequest};
use crate::piles::{Pile, PileId, PileSet};
use crate::rules::{deal_all, RulePolicy, VariantRegistry};

/// What a session operation did to the piles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Transfers applied, in order. Reversed moves are listed as logged.
    pub moves: Vec<Move>,
    /// Net score change.
    pub score_delta: i32,
    /// This operation won the game.
    pub won: bool,
}

/// A game in progress.
pub struct GameSession {
    rules: Box<dyn RulePolicy>,
    piles: PileSet,
    deck: Deck,
    log: MoveLog,
    score: i32,
    won: bool,
    stats: VariantStats,
    store: Option<Box<dyn KeyValueStore>>,
    observer: Option<Box<dyn MoveObserver>>,
}

/// Run one log entry against a copy of `piles`, forward or in reverse.
///
/// Returns the updated copy and each move with its score delta, in the
/// order applied. The live piles are untouched if any move fails.
fn replay_entry(
    rules: &dyn RulePolicy,
    piles: &PileSet,
    entry: &LogEntry,
    reverse: bool,
) -> Result<(PileSet, Vec<(Move, i32)>)> {
    let mut piles = piles.clone();
    let mut engine = MoveEngine::new(rules, &mut piles);
    let mut steps = Vec::with_capacity(entry.len());
    if reverse {
        for mv in entry.moves().iter().rev() {
            steps.push((*mv, engine.reverse(mv)?));
        }
    } else {
        for mv in entry.moves() {
            let delta = engine
                .apply(mv)
                .map_err(|err| EngineError::IrreversibleMove(format!("redo {}: {}", mv, err)))?;
            steps.push((*mv, delta));
        }
    }
    Ok((piles, steps))
}

/// Check that a loaded log fits the loaded piles: every applied entry
/// reverses back to the deal and every stored entry then replays forward.
fn check_history(rules: &dyn RulePolicy, piles: &PileSet, log: &MoveLog) -> Result<()> {
    let corrupt = |index: usize, err: EngineError| {
        EngineError::CorruptSaveData(format!("logged move {} does not fit the piles: {}", index, err))
    };
    let mut piles = piles.clone();
    for index in (0..log.position()).rev() {
        if let Some(entry) = log.entry(index) {
            piles = replay_entry(rules, &piles, entry, true).map_err(|err| corrupt(index, err))?.0;
        }
    }
    for (index, entry) in log.entries().enumerate() {
        piles = replay_entry(rules, &piles, entry, false).map_err(|err| corrupt(index, err))?.0;
    }
    Ok(())
}

// Only strings, numbers and card tuples are serialized.
fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

impl GameSession {
    /// Shuffle and deal a new game of the named variant.
    ///
    /// With a seed the deal is reproducible.
    pub fn new(registry: &VariantRegistry, name: &str, seed: Option<u64>) -> Result<Self> {
        Self::start(registry.create(name)?, seed)
    }

    fn start(rules: Box<dyn RulePolicy>, seed: Option<u64>) -> Result<Self> {
        let decks = rules.config().decks;
        let mut deck = match seed {
            Some(seed) => Deck::with_seed(decks, seed),
            None => Deck::new(decks),
        };
        deck.shuffle();

        let mut session = Self {
            piles: PileSet::from_config(rules.config()),
            rules,
            deck,
            log: MoveLog::new(),
            score: 0,
            won: false,
            stats: VariantStats::default(),
            store: None,
            observer: None,
        };
        session.deal()?;
        log::info!("new {} game", session.rules.name());
        Ok(session)
    }

    /// Attach a store and write the whole game to it.
    ///
    /// Statistics already in the store for this variant are kept.
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.stats = VariantStats::load(store.as_ref(), self.rules.name()).unwrap_or_else(|err| {
            log::warn!("resetting {} statistics: {}", self.rules.name(), err);
            VariantStats::default()
        });
        self.store = Some(store);
        self.save();
        self
    }

    /// Attach an observer for applied moves.
    pub fn set_observer(&mut self, observer: Box<dyn MoveObserver>) {
        self.observer = Some(observer);
    }

    /// Detach and return the store.
    pub fn take_store(&mut self) -> Option<Box<dyn KeyValueStore>> {
        self.store.take()
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &dyn RulePolicy {
        self.rules.as_ref()
    }

    /// Variant name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.rules.name()
    }

    /// Rules summary for the player.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.rules.config().help
    }

    #[must_use]
    pub fn piles(&self) -> &PileSet {
        &self.piles
    }

    #[must_use]
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        self.piles.get(id)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn max_score(&self) -> i32 {
        self.rules.max_score()
    }

    /// Whether the game has been won. Stays set until a new deal.
    #[must_use]
    pub fn won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn stats(&self) -> VariantStats {
        self.stats
    }

    #[must_use]
    pub fn store(&self) -> Option<&dyn KeyValueStore> {
        self.store.as_deref()
    }

    /// Cards on the table plus cards still in the deck.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.total_cards() + self.deck.remaining()
    }

    // === Game lifecycle ===

    /// Reshuffle and deal a new game of the same variant.
    ///
    /// The game being replaced counts as played if any move was made.
    pub fn new_game(&mut self, seed: Option<u64>) -> Result<()> {
        self.retire();
        if let Some(seed) = seed {
            self.deck = Deck::with_seed(self.rules.config().decks, seed);
        }
        self.deck.shuffle();
        self.deal()?;
        self.save();
        log::info!("new {} game", self.rules.name());
        Ok(())
    }

    /// Deal the current game again from the same shuffle.
    pub fn restart(&mut self) -> Result<()> {
        self.deck.rewind(false);
        self.deal()?;
        self.save();
        log::info!("restart {} game", self.rules.name());
        Ok(())
    }

    /// Replace the session with a new game of another variant.
    ///
    /// The store and observer carry over.
    pub fn switch_variant(&mut self, registry: &VariantRegistry, name: &str, seed: Option<u64>) -> Result<()> {
        let rules = registry.create(name)?;
        self.retire();

        let mut next = Self::start(rules, seed)?;
        next.observer = self.observer.take();
        if let Some(store) = self.store.take() {
            next = next.with_store(store);
        }
        *self = next;
        Ok(())
    }

    fn deal(&mut self) -> Result<()> {
        self.piles.clear();
        self.log.clear();
        self.score = 0;
        self.won = false;
        deal_all(self.rules.as_ref(), &mut self.piles, &mut self.deck)?;
        Ok(())
    }

    fn retire(&mut self) {
        if self.log.max() == 0 {
            return;
        }
        self.stats.record_played();
        self.persist(|session, store| session.stats.save(store, session.rules.name()));
    }

    // === Moves ===

    /// Validate and apply a player move, then any follow-up hook moves.
    ///
    /// An illegal request changes nothing.
    pub fn request_move(&mut self, req: MoveRequest) -> Result<MoveOutcome> {
        let mv = MoveEngine::new(self.rules.as_ref(), &mut self.piles).validate(&req)?;
        let mut outcome = MoveOutcome::default();
        self.perform(mv, &mut outcome)?;
        self.settle(&mut outcome)?;
        Ok(outcome)
    }

    /// Run the variant's deal action.
    ///
    /// Returns `None` when the variant has nothing to deal.
    pub fn deal_next(&mut self) -> Result<Option<MoveOutcome>> {
        let Some(mv) = self.rules.on_deal(&self.piles) else {
            return Ok(None);
        };
        let mv = MoveEngine::new(self.rules.as_ref(), &mut self.piles).prepare(mv)?;
        let mut outcome = MoveOutcome::default();
        self.perform(mv, &mut outcome)?;
        self.settle(&mut outcome)?;
        Ok(Some(outcome))
    }

    /// Apply `on_moved` hook moves until the variant has none left.
    fn settle(&mut self, outcome: &mut MoveOutcome) -> Result<()> {
        for _ in 0..self.rules.config().total_cards() {
            let Some(mv) = self.rules.on_moved(&self.piles) else {
                return Ok(());
            };
            let mv = MoveEngine::new(self.rules.as_ref(), &mut self.piles).prepare(mv)?;
            self.perform(mv, outcome)?;
        }
        log::warn!("{} follow-up moves did not settle", self.rules.name());
        Ok(())
    }

    fn perform(&mut self, mv: Move, outcome: &mut MoveOutcome) -> Result<()> {
        let delta = MoveEngine::new(self.rules.as_ref(), &mut self.piles).apply(&mv)?;
        let index = self.log.record(mv);
        self.score += delta;
        outcome.moves.push(mv);
        outcome.score_delta += delta;

        self.persist(|session, store| {
            session.write_pile(store, mv.src);
            session.write_pile(store, mv.dst);
            if let Some(text) = session.log.export_entry(index) {
                store.set(MOVES_SECTION, &index.to_string(), text);
            }
            session.write_position(store);
            session.write_score(store);
        });
        self.notify(MoveEvent {
            mv,
            score_delta: delta,
            replay: false,
            reverse: false,
        });

        if self.check_win() {
            outcome.won = true;
        }
        Ok(())
    }

    fn check_win(&mut self) -> bool {
        if self.won || self.score != self.rules.max_score() {
            return false;
        }
        self.won = true;
        self.stats.record_win(self.log.position());
        log::info!("{} won in {} moves", self.rules.name(), self.log.position());

        self.persist(|session, store| {
            session.write_score(store);
            session.stats.save(store, session.rules.name());
        });
        if let Some(observer) = self.observer.as_mut() {
            observer.on_win(self.score);
        }
        true
    }

    // === History ===

    /// Reverse the most recent log entry.
    ///
    /// On failure neither the piles nor the log position change.
    pub fn undo(&mut self) -> Result<MoveOutcome> {
        let entry = self.log.undo_entry()?.clone();
        let (piles, steps) = replay_entry(self.rules.as_ref(), &self.piles, &entry, true)?;
        self.piles = piles;
        self.log.undo_step()?;

        let mut outcome = MoveOutcome::default();
        for (mv, delta) in steps {
            self.replayed(mv, delta, true, &mut outcome);
        }
        self.persist(|session, store| session.write_position(store));
        Ok(outcome)
    }

    /// Replay the next undone log entry.
    ///
    /// On failure neither the piles nor the log position change.
    pub fn redo(&mut self) -> Result<MoveOutcome> {
        let entry = self.log.redo_entry()?.clone();
        let (piles, steps) = replay_entry(self.rules.as_ref(), &self.piles, &entry, false)?;
        self.piles = piles;
        self.log.redo_step()?;

        let mut outcome = MoveOutcome::default();
        for (mv, delta) in steps {
            self.replayed(mv, delta, false, &mut outcome);
            if self.check_win() {
                outcome.won = true;
            }
        }
        self.persist(|session, store| session.write_position(store));
        Ok(outcome)
    }

    /// Undo or redo until the log position is `position`.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.log.max() {
            return Err(EngineError::NothingToRedo);
        }
        while self.log.position() > position {
            self.undo()?;
        }
        while self.log.position() < position {
            self.redo()?;
        }
        Ok(())
    }

    fn replayed(&mut self, mv: Move, delta: i32, reverse: bool, outcome: &mut MoveOutcome) {
        self.score += delta;
        outcome.moves.push(mv);
        outcome.score_delta += delta;
        self.persist(|session, store| {
            session.write_pile(store, mv.src);
            session.write_pile(store, mv.dst);
            session.write_score(store);
        });
        self.notify(MoveEvent {
            mv,
            score_delta: delta,
            replay: true,
            reverse,
        });
    }

    fn notify(&mut self, event: MoveEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_move(&event);
        }
    }

    // === Persistence ===

    fn persist(&mut self, write: impl FnOnce(&Self, &mut dyn KeyValueStore)) {
        if let Some(mut store) = self.store.take() {
            write(self, store.as_mut());
            self.store = Some(store);
        }
    }

    fn write_pile(&self, store: &mut dyn KeyValueStore, id: PileId) {
        if let Some(pile) = self.piles.get(id) {
            store.set(PILES_SECTION, &id.to_string(), to_json(&pile.save()));
        }
    }

    fn write_position(&self, store: &mut dyn KeyValueStore) {
        store.set(MOVES_SECTION, "count", self.log.position().to_string());
        store.set(MOVES_SECTION, "max", self.log.max().to_string());
    }

    fn write_score(&self, store: &mut dyn KeyValueStore) {
        store.set(GAME_SECTION, "score", self.score.to_string());
        store.set(GAME_SECTION, "won", self.won.to_string());
    }

    /// Write the whole game to the attached store, if any.
    pub fn save(&mut self) {
        self.persist(|session, store| session.save_to(store));
    }

    /// Write the whole game to `store`, replacing the saved piles and moves.
    pub fn save_to(&self, store: &mut dyn KeyValueStore) {
        store.set(GAME_SECTION, "name", self.rules.name().to_string());
        store.set(GAME_SECTION, "deck", to_json(&self.deck.export()));
        self.write_score(store);

        store.clear_section(PILES_SECTION);
        for pile in self.piles.iter() {
            self.write_pile(store, pile.id());
        }

        store.clear_section(MOVES_SECTION);
        for index in 0..self.log.max() {
            if let Some(text) = self.log.export_entry(index) {
                store.set(MOVES_SECTION, &index.to_string(), text);
            }
        }
        self.write_position(store);
        self.stats.save(store, self.rules.name());
    }

    /// Resume the game saved in `store` and keep writing to it.
    pub fn load(registry: &VariantRegistry, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let session = Self::read(registry, store.as_ref())?;
        log::info!("resumed {} game at move {}", session.rules.name(), session.log.position());
        Ok(session.with_store(store))
    }

    /// Resume the saved game, or deal a new one if there is none or it
    /// cannot be read.
    ///
    /// A new game keeps the saved variant when it is still registered.
    pub fn load_or_new(registry: &VariantRegistry, store: Box<dyn KeyValueStore>, seed: Option<u64>) -> Result<Self> {
        let saved_name = store.get(GAME_SECTION, "name");
        if saved_name.is_some() {
            match Self::read(registry, store.as_ref()) {
                Ok(session) => return Ok(session.with_store(store)),
                Err(err) => log::warn!("discarding saved game: {}", err),
            }
        } else {
            log::info!("no saved game");
        }

        let name = saved_name
            .filter(|name| registry.contains(name))
            .or_else(|| registry.default_name().map(str::to_string))
            .ok_or_else(|| EngineError::UnknownVariant(String::new()))?;
        Ok(Self::new(registry, &name, seed)?.with_store(store))
    }

    fn read(registry: &VariantRegistry, store: &dyn KeyValueStore) -> Result<Self> {
        let variant = get_required(store, GAME_SECTION, "name")?;
        let rules = registry.create(&variant)?;
        let deck: DeckState = serde_json::from_str(&get_required(store, GAME_SECTION, "deck")?)?;

        let mut piles = Vec::new();
        for pile in PileSet::from_config(rules.config()).iter() {
            let id = pile.id();
            let cards: Vec<CardExport> = serde_json::from_str(&get_required(store, PILES_SECTION, &id.to_string())?)?;
            piles.push((id, cards));
        }

        let max: usize = get_parsed(store, MOVES_SECTION, "max")?.unwrap_or(0);
        let entries = (0..max)
            .map(|i| get_required(store, MOVES_SECTION, &i.to_string()).and_then(|text| MoveLog::import_entry(&text)))
            .collect::<Result<Vec<_>>>()?;

        let snapshot = Snapshot {
            variant,
            piles,
            deck,
            entries,
            position: get_parsed(store, MOVES_SECTION, "count")?.unwrap_or(0),
            score: get_parsed(store, GAME_SECTION, "score")?.unwrap_or(0),
            won: get_parsed(store, GAME_SECTION, "won")?.unwrap_or(false),
        };
        let mut session = Self::restore(rules, snapshot)?;
        session.stats = VariantStats::load(store, session.rules.name())?;
        Ok(session)
    }

    // === Snapshots ===

    /// Capture the game for a binary save.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            variant: self.rules.name().to_string(),
            piles: self.piles.iter().map(|p| (p.id(), p.save())).collect(),
            deck: self.deck.export(),
            entries: self.log.entries().cloned().collect(),
            position: self.log.position(),
            score: self.score,
            won: self.won,
        }
    }

    /// Rebuild a game from a snapshot. No store or observer is attached.
    pub fn from_snapshot(registry: &VariantRegistry, snapshot: &Snapshot) -> Result<Self> {
        let rules = registry.create(&snapshot.variant)?;
        Self::restore(rules, snapshot.clone())
    }

    fn restore(rules: Box<dyn RulePolicy>, snapshot: Snapshot) -> Result<Self> {
        let mut piles = PileSet::from_config(rules.config());
        for (id, cards) in &snapshot.piles {
            let pile = piles
                .get_mut(*id)
                .ok_or_else(|| EngineError::CorruptSaveData(format!("{} has no pile {}", rules.name(), id)))?;
            pile.load(cards, rules.as_ref())?;
        }

        let deck = Deck::import(&snapshot.deck)?;
        let expected = rules.config().total_cards();
        if deck.len() != expected || piles.total_cards() + deck.remaining() != expected {
            return Err(EngineError::CorruptSaveData(format!(
                "{} cards on the table and {} in the deck, expected {} in all",
                piles.total_cards(),
                deck.remaining(),
                expected
            )));
        }

        let mut held: Vec<(Suit, Rank)> = piles
            .iter()
            .flat_map(|pile| pile.cards())
            .chain(deck.cards()[deck.cursor()..].iter().copied())
            .map(|card| (card.suit, card.rank))
            .collect();
        let mut full: Vec<(Suit, Rank)> = deck.cards().iter().map(|card| (card.suit, card.rank)).collect();
        held.sort_unstable();
        full.sort_unstable();
        if held != full {
            return Err(EngineError::CorruptSaveData(
                "cards on the table and in the deck do not make up the deck".to_string(),
            ));
        }

        let log = MoveLog::from_parts(snapshot.entries, snapshot.position)?;
        let unknown = log
            .entries()
            .flat_map(|entry| entry.moves())
            .flat_map(|mv| [mv.src, mv.dst])
            .find(|id| !piles.contains(*id));
        if let Some(id) = unknown {
            return Err(EngineError::CorruptSaveData(format!("logged move names missing pile {}", id)));
        }
        check_history(rules.as_ref(), &piles, &log)?;

        Ok(Self {
            rules,
            piles,
            deck,
            log,
            score: snapshot.score,
            won: snapshot.won,
            stats: VariantStats::default(),
            store: None,
            observer: None,
        })
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("variant", &self.rules.name())
            .field("score", &self.score)
            .field("won", &self.won)
            .field("position", &self.log.position())
            .field("max", &self.log.max())
            .finish_non_exhaustive()
    }
}
