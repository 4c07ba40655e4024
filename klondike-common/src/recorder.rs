//! Single-step undo.
//!
//! Only the last transfer can be taken back: recording a move replaces
//! whatever was recorded before it.

use crate::pile::{Cards, Pile, PileId};

/// The last transfer, with the source pile as it was before the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub source: PileId,
    pub destination: PileId,
    pub count: usize,
    pub snapshot: Cards,
    /// The move turned a face-down tableau card face up.
    pub revealed: bool,
    reversed: bool,
}

impl MoveRecord {
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

#[derive(Debug, Clone, Default)]
pub struct MovementRecorder {
    record: Option<MoveRecord>,
    locked: bool,
}

impl MovementRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        self.record.as_ref().is_some_and(|r| !r.reversed)
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.record.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Remembers `count` cards leaving `source` for `destination`.
    ///
    /// Must be called before `source_pile` is mutated. Ignored while an
    /// undo is in progress.
    pub fn record_move(
        &mut self,
        source: PileId,
        source_pile: &Pile,
        destination: PileId,
        count: usize,
    ) {
        if self.locked {
            return;
        }
        self.record = Some(MoveRecord {
            source,
            destination,
            count,
            snapshot: source_pile.snapshot(),
            revealed: false,
            reversed: false,
        });
    }

    pub fn set_revealed(&mut self, revealed: bool) {
        if self.locked {
            return;
        }
        if let Some(record) = self.record.as_mut() {
            record.revealed = revealed;
        }
    }

    /// Locks recording and hands out the move to reverse.
    pub fn begin_undo(&mut self) -> Option<MoveRecord> {
        let Some(record) = self.record.as_mut().filter(|r| !r.reversed) else {
            log::warn!("Nothing to undo");
            return None;
        };
        record.reversed = true;
        self.locked = true;
        Some(record.clone())
    }

    /// Drops the reversed move and unlocks recording.
    pub fn finish_undo(&mut self) {
        self.record = None;
        self.locked = false;
    }

    pub fn clear(&mut self) {
        self.record = None;
        self.locked = false;
    }
}
