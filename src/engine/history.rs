//! Move log: ordered, replayable history with an undo cursor.
//!
//! The log holds entries `0..max` and a `position`. Entries below the
//! position are applied; entries at or above it are redoable. Recording a
//! new move first truncates the log to the position, which discards any
//! redo history.
//!
//! Entries live in an `im::Vector` so snapshots clone the log cheaply.

use im::Vector;

use super::moves::{LogEntry, Move};
use crate::core::{EngineError, Result};

/// Undo/redo history of applied moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: Vector<LogEntry>,
    position: usize,
}

impl MoveLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted entries.
    pub fn from_parts(entries: Vec<LogEntry>, position: usize) -> Result<Self> {
        if position > entries.len() {
            return Err(EngineError::CorruptSaveData(format!(
                "move position {} beyond {} entries",
                position,
                entries.len()
            )));
        }
        if let Some(i) = entries.iter().position(LogEntry::is_empty) {
            return Err(EngineError::CorruptSaveData(format!("move entry {} is empty", i)));
        }
        Ok(Self {
            entries: entries.into_iter().collect(),
            position,
        })
    }

    /// Number of applied entries.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// High-water mark: number of stored entries, applied or redoable.
    #[must_use]
    pub fn max(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Entry at `index`, applied or not.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// Most recently applied entry.
    #[must_use]
    pub fn current(&self) -> Option<&LogEntry> {
        self.position.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// All stored entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Record an applied move.
    ///
    /// Forward history is dropped first. An appended move joins the current
    /// entry; otherwise, or at position 0, it starts a new one. Returns the
    /// index of the entry that now holds the move.
    pub fn record(&mut self, mv: Move) -> usize {
        self.truncate(self.position);
        if mv.append && self.position > 0 {
            let index = self.position - 1;
            if let Some(entry) = self.entries.get_mut(index) {
                entry.push(mv);
            }
            index
        } else {
            self.entries.push_back(LogEntry::new(mv));
            self.position += 1;
            self.position - 1
        }
    }

    /// Entry the next undo reverses. The cursor does not move.
    pub fn undo_entry(&self) -> Result<&LogEntry> {
        self.position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .ok_or(EngineError::NothingToUndo)
    }

    /// Entry the next redo replays. The cursor does not move.
    pub fn redo_entry(&self) -> Result<&LogEntry> {
        self.entries.get(self.position).ok_or(EngineError::NothingToRedo)
    }

    /// Step back one entry once it has been reversed.
    pub fn undo_step(&mut self) -> Result<()> {
        self.undo_entry()?;
        self.position -= 1;
        Ok(())
    }

    /// Step forward one entry once it has been replayed.
    pub fn redo_step(&mut self) -> Result<()> {
        self.redo_entry()?;
        self.position += 1;
        Ok(())
    }

    /// Drop entries at and beyond `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.entries.len() {
            self.entries.truncate(len);
        }
        self.position = self.position.min(len);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
    }

    /// Serialized entry at `index`, for the store's `moves` section.
    #[must_use]
    pub fn export_entry(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(LogEntry::export)
    }

    /// Parse a serialized entry.
    pub fn import_entry(text: &str) -> Result<LogEntry> {
        LogEntry::import(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piles::PileId;

    fn mv(from: usize, to: usize) -> Move {
        Move::new(PileId::tableau(from), PileId::tableau(to), 1)
    }

    #[test]
    fn test_record_and_undo() {
        let mut log = MoveLog::new();
        assert_eq!(log.record(mv(0, 1)), 0);
        assert_eq!(log.record(mv(1, 2)), 1);
        assert_eq!(log.position(), 2);

        assert_eq!(log.undo_entry().unwrap().moves(), &[mv(1, 2)]);
        assert_eq!(log.position(), 2);
        log.undo_step().unwrap();
        assert_eq!(log.position(), 1);
        assert_eq!(log.max(), 2);
        assert!(log.can_redo());
    }

    #[test]
    fn test_append_joins_current_entry() {
        let mut log = MoveLog::new();
        log.record(mv(0, 1));
        let deal = Move::new(PileId::waste(0), PileId::waste(1), 3).with_flip().appended();
        assert_eq!(log.record(deal), 0);

        assert_eq!(log.max(), 1);
        assert_eq!(log.current().unwrap().len(), 2);
    }

    #[test]
    fn test_append_at_start_opens_entry() {
        let mut log = MoveLog::new();
        log.record(mv(0, 1).appended());
        assert_eq!(log.position(), 1);
        assert_eq!(log.max(), 1);
    }

    #[test]
    fn test_record_truncates_redo() {
        let mut log = MoveLog::new();
        log.record(mv(0, 1));
        log.record(mv(1, 2));
        log.record(mv(2, 3));
        log.undo_step().unwrap();
        log.undo_step().unwrap();

        log.record(mv(4, 5));
        assert_eq!(log.position(), 2);
        assert_eq!(log.max(), 2);
        assert!(!log.can_redo());
        assert_eq!(log.redo_step(), Err(EngineError::NothingToRedo));
    }

    #[test]
    fn test_redo() {
        let mut log = MoveLog::new();
        log.record(mv(0, 1));
        log.undo_step().unwrap();
        assert_eq!(log.undo_step(), Err(EngineError::NothingToUndo));
        assert_eq!(log.position(), 0);

        assert_eq!(log.redo_entry().unwrap().moves(), &[mv(0, 1)]);
        log.redo_step().unwrap();
        assert_eq!(log.position(), 1);
        assert_eq!(log.redo_entry(), Err(EngineError::NothingToRedo));
    }

    #[test]
    fn test_from_parts_validates() {
        let entries = vec![LogEntry::new(mv(0, 1))];
        assert!(MoveLog::from_parts(entries.clone(), 1).is_ok());
        assert!(matches!(
            MoveLog::from_parts(entries, 2),
            Err(EngineError::CorruptSaveData(_))
        ));
        assert!(matches!(
            MoveLog::from_parts(vec![LogEntry::default()], 0),
            Err(EngineError::CorruptSaveData(_))
        ));
    }

    #[test]
    fn test_export_entry() {
        let mut log = MoveLog::new();
        log.record(mv(3, 0));
        let text = log.export_entry(0).unwrap();
        assert_eq!(MoveLog::import_entry(&text).unwrap(), *log.entry(0).unwrap());
        assert!(log.export_entry(1).is_none());
    }
}
