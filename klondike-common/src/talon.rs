//! Stock to talon draw cycle.

use crate::options::DrawMode;
use crate::pile::Pile;

/// What a click on the stock produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalonCardState {
    /// Cards were drawn onto the talon.
    Normal,
    /// The talon was turned back into the stock. The next click draws.
    DeckPlayed,
    /// Nothing to draw and nothing to recycle.
    Empty,
}

/// The transfer a stock click is about to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalonStep {
    /// Move this many cards from the stock onto the talon.
    Draw(usize),
    /// Move the whole talon (this many cards) back onto the stock.
    Recycle(usize),
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalonCycle {
    draw_mode: DrawMode,
    max_passes: Option<u32>,
    passes: u32,
    exhausted: bool,
}

impl TalonCycle {
    pub fn new(draw_mode: DrawMode, max_passes: Option<u32>) -> Self {
        Self {
            draw_mode,
            max_passes,
            passes: 0,
            exhausted: false,
        }
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Number of times the talon has been turned back into the stock.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// True once the stock has been drawn dry and not yet recycled.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn can_recycle(&self) -> bool {
        self.max_passes.is_none_or(|max| self.passes < max)
    }

    pub fn plan(&self, stock: &Pile, talon: &Pile) -> TalonStep {
        if !stock.is_empty() {
            TalonStep::Draw(self.draw_mode.count().min(stock.len()))
        } else if !talon.is_empty() && self.can_recycle() {
            TalonStep::Recycle(talon.len())
        } else {
            TalonStep::Idle
        }
    }

    /// Performs one stock click.
    pub fn draw_next(&mut self, stock: &mut Pile, talon: &mut Pile) -> TalonCardState {
        let step = self.plan(stock, talon);
        self.apply(step, stock, talon)
    }

    /// Performs a step previously returned by [`TalonCycle::plan`].
    ///
    /// Drawn cards are taken off the stock top one by one, so the deepest
    /// card of a three-card draw ends on top of the talon. Recycling
    /// reverses the talon into the stock, which replays the same order on
    /// the next pass. A draw never takes more than the stock holds.
    pub(crate) fn apply(
        &mut self,
        step: TalonStep,
        stock: &mut Pile,
        talon: &mut Pile,
    ) -> TalonCardState {
        match step {
            TalonStep::Draw(count) => {
                let count = count.min(stock.len());
                let drawn = stock.take(count);
                talon.extend(drawn.into_iter().rev().map(|mut card| {
                    card.set_face_up(true);
                    card
                }));
                self.exhausted = stock.is_empty();
                log::debug!("Drew {count} card(s), {} left in stock", stock.len());
                TalonCardState::Normal
            }
            TalonStep::Recycle(_) => {
                let cards = talon.take_all();
                stock.extend(cards.into_iter().rev().map(|mut card| {
                    card.set_face_up(false);
                    card
                }));
                self.passes += 1;
                self.exhausted = false;
                log::debug!("Recycled talon into stock, pass {}", self.passes);
                TalonCardState::DeckPlayed
            }
            TalonStep::Idle => TalonCardState::Empty,
        }
    }

    /// Rolls the pass counter back after an undone recycle.
    pub fn undo_recycle(&mut self) {
        self.passes = self.passes.saturating_sub(1);
    }

    /// Re-derives the exhausted flag after the stock changed outside the cycle.
    pub fn sync(&mut self, stock: &Pile) {
        self.exhausted = stock.is_empty();
    }

    pub fn reset(&mut self) {
        self.passes = 0;
        self.exhausted = false;
    }
}
