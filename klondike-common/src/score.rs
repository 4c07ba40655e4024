//! Scoring policy driven by move events.

use crate::game::MoveEvent;
use crate::options::{DrawMode, ScoringMode};
use crate::pile::PileKind;

/// Point values for each kind of transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTable {
    pub talon_to_tableau: i32,
    pub to_foundation: i32,
    pub reveal: i32,
    pub foundation_to_tableau: i32,
    pub recycle_draw_one: i32,
    pub recycle_draw_three: i32,
    /// Score a game starts from.
    pub ante: i32,
    /// Whether the score may drop below zero.
    pub allow_negative: bool,
}

impl ScoreTable {
    pub const STANDARD: ScoreTable = ScoreTable {
        talon_to_tableau: 5,
        to_foundation: 10,
        reveal: 5,
        foundation_to_tableau: -15,
        recycle_draw_one: -100,
        recycle_draw_three: -20,
        ante: 0,
        allow_negative: false,
    };

    pub const VEGAS: ScoreTable = ScoreTable {
        talon_to_tableau: 0,
        to_foundation: 5,
        reveal: 0,
        foundation_to_tableau: -5,
        recycle_draw_one: 0,
        recycle_draw_three: 0,
        ante: -52,
        allow_negative: true,
    };

    pub const NONE: ScoreTable = ScoreTable {
        talon_to_tableau: 0,
        to_foundation: 0,
        reveal: 0,
        foundation_to_tableau: 0,
        recycle_draw_one: 0,
        recycle_draw_three: 0,
        ante: 0,
        allow_negative: false,
    };

    pub fn for_mode(mode: ScoringMode) -> Self {
        match mode {
            ScoringMode::Standard => Self::STANDARD,
            ScoringMode::Vegas => Self::VEGAS,
            ScoringMode::None => Self::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorekeeper {
    table: ScoreTable,
    draw_mode: DrawMode,
    cumulative: bool,
    score: i32,
    /// What the last forward move actually changed, after flooring.
    last_applied: Option<i32>,
}

impl Scorekeeper {
    pub fn new(mode: ScoringMode, draw_mode: DrawMode, cumulative: bool) -> Self {
        Self::with_table(ScoreTable::for_mode(mode), draw_mode, cumulative)
    }

    pub fn with_table(table: ScoreTable, draw_mode: DrawMode, cumulative: bool) -> Self {
        Self {
            table,
            draw_mode,
            cumulative,
            score: table.ante,
            last_applied: None,
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    /// Points a forward move is worth, ignoring the undo flag.
    pub fn delta(&self, event: &MoveEvent) -> i32 {
        let t = &self.table;
        let transfer = match (event.from, event.to) {
            (PileKind::Talon, PileKind::Tableau) => t.talon_to_tableau,
            (PileKind::Foundation, PileKind::Tableau) => t.foundation_to_tableau,
            (_, PileKind::Foundation) => t.to_foundation * event.count as i32,
            (PileKind::Talon, PileKind::Stock) => match self.draw_mode {
                DrawMode::One => t.recycle_draw_one,
                DrawMode::Three => t.recycle_draw_three,
            },
            _ => 0,
        };
        let reveal = if event.revealed { t.reveal } else { 0 };
        transfer + reveal
    }

    /// Applies a move. An undo takes back exactly what the move it reverses
    /// added, so flooring at zero never turns an undo into a gain.
    pub fn on_move(&mut self, event: &MoveEvent) {
        if event.is_undo {
            let applied = self.last_applied.take().unwrap_or_else(|| self.delta(event));
            self.score -= applied;
            return;
        }
        let before = self.score;
        self.score += self.delta(event);
        if !self.table.allow_negative {
            self.score = self.score.max(0);
        }
        self.last_applied = Some(self.score - before);
    }

    /// Starts the next game, keeping the running total when cumulative.
    pub fn new_game(&mut self) {
        self.last_applied = None;
        if self.cumulative {
            self.score += self.table.ante;
        } else {
            self.score = self.table.ante;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(from: PileKind, to: PileKind) -> MoveEvent {
        MoveEvent {
            from,
            to,
            count: 1,
            revealed: false,
            is_undo: false,
        }
    }

    #[test]
    fn test_standard_scoring() {
        let mut keeper = Scorekeeper::new(ScoringMode::Standard, DrawMode::One, false);
        keeper.on_move(&event(PileKind::Talon, PileKind::Tableau));
        assert_eq!(keeper.score(), 5);
        keeper.on_move(&event(PileKind::Tableau, PileKind::Foundation));
        assert_eq!(keeper.score(), 15);
        keeper.on_move(&MoveEvent {
            revealed: true,
            ..event(PileKind::Tableau, PileKind::Tableau)
        });
        assert_eq!(keeper.score(), 20);
        keeper.on_move(&event(PileKind::Foundation, PileKind::Tableau));
        assert_eq!(keeper.score(), 5);
        keeper.on_move(&event(PileKind::Talon, PileKind::Stock));
        assert_eq!(keeper.score(), 0);
    }

    #[test]
    fn test_undo_reverses_delta() {
        let mut keeper = Scorekeeper::new(ScoringMode::Standard, DrawMode::Three, false);
        let forward = MoveEvent {
            revealed: true,
            ..event(PileKind::Tableau, PileKind::Foundation)
        };
        keeper.on_move(&forward);
        assert_eq!(keeper.score(), 15);
        keeper.on_move(&MoveEvent {
            is_undo: true,
            ..forward
        });
        assert_eq!(keeper.score(), 0);
    }

    #[test]
    fn test_undo_after_floored_penalty() {
        let mut keeper = Scorekeeper::new(ScoringMode::Standard, DrawMode::One, false);
        keeper.on_move(&event(PileKind::Talon, PileKind::Tableau));
        assert_eq!(keeper.score(), 5);

        let back = event(PileKind::Foundation, PileKind::Tableau);
        keeper.on_move(&back);
        assert_eq!(keeper.score(), 0);
        keeper.on_move(&MoveEvent {
            is_undo: true,
            ..back
        });
        assert_eq!(keeper.score(), 5);

        let recycle = event(PileKind::Talon, PileKind::Stock);
        keeper.on_move(&recycle);
        assert_eq!(keeper.score(), 0);
        keeper.on_move(&MoveEvent {
            is_undo: true,
            ..recycle
        });
        assert_eq!(keeper.score(), 5);
    }

    #[test]
    fn test_draw_three_recycle_penalty() {
        let keeper = Scorekeeper::new(ScoringMode::Standard, DrawMode::Three, false);
        assert_eq!(keeper.delta(&event(PileKind::Talon, PileKind::Stock)), -20);
        assert_eq!(keeper.delta(&event(PileKind::Stock, PileKind::Talon)), 0);
    }

    #[test]
    fn test_vegas_cumulative() {
        let mut keeper = Scorekeeper::new(ScoringMode::Vegas, DrawMode::Three, true);
        assert_eq!(keeper.score(), -52);
        keeper.on_move(&event(PileKind::Talon, PileKind::Foundation));
        keeper.on_move(&event(PileKind::Tableau, PileKind::Foundation));
        assert_eq!(keeper.score(), -42);
        keeper.new_game();
        assert_eq!(keeper.score(), -94);

        let mut keeper = Scorekeeper::new(ScoringMode::Vegas, DrawMode::Three, false);
        keeper.on_move(&event(PileKind::Talon, PileKind::Foundation));
        keeper.new_game();
        assert_eq!(keeper.score(), -52);
    }

    #[test]
    fn test_no_scoring() {
        let mut keeper = Scorekeeper::new(ScoringMode::None, DrawMode::One, false);
        keeper.on_move(&event(PileKind::Tableau, PileKind::Foundation));
        keeper.on_move(&event(PileKind::Talon, PileKind::Stock));
        assert_eq!(keeper.score(), 0);
    }
}
