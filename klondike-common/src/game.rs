//! A game session: the board plus everything that evolves with it.

use crate::action::Action;
use crate::board::Board;
use crate::card::Card;
use crate::error::BoardError;
use crate::options::{DrawMode, Options};
use crate::pile::{PileId, PileKind};
use crate::recorder::MovementRecorder;
use crate::rules;
use crate::score::Scorekeeper;
use crate::talon::{TalonCardState, TalonCycle, TalonStep};
use crate::win::scan_for_win;

use anyhow::{Context, Result};
use rand::Rng;
use std::fmt;

/// Emitted after every accepted transfer and every undo.
///
/// `from` and `to` always describe the original move, so an undo of
/// talon→foundation is reported as talon→foundation with `is_undo` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvent {
    pub from: PileKind,
    pub to: PileKind,
    pub count: usize,
    /// A face-down tableau card was turned up by the move.
    pub revealed: bool,
    pub is_undo: bool,
}

type Listener = Box<dyn FnMut(&MoveEvent)>;

pub struct Game {
    options: Options,
    board: Board,
    talon: TalonCycle,
    recorder: MovementRecorder,
    scorekeeper: Scorekeeper,
    listeners: Vec<Listener>,
    moves: usize,
    won: bool,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("options", &self.options)
            .field("board", &self.board)
            .field("talon", &self.talon)
            .field("recorder", &self.recorder)
            .field("scorekeeper", &self.scorekeeper)
            .field("moves", &self.moves)
            .field("won", &self.won)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(options: Options) -> Self {
        Self::with_rng(options, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(options: Options, rng: &mut R) -> Self {
        let board = Board::deal(rng);
        log::info!("New game, draw {}", options.draw_mode);
        Self::assemble(board, options)
    }

    /// Starts from a given position, which must hold all 52 cards.
    pub fn from_board(board: Board, options: Options) -> Result<Self, BoardError> {
        board.verify()?;
        Ok(Self::assemble(board, options))
    }

    /// Loads a position in the board text format. A `DrawCount:` line
    /// overrides the draw mode in `options`.
    pub fn parse(content: &str, mut options: Options) -> Result<Self> {
        let board = Board::parse(content)?;
        for line in content.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix("DrawCount:") {
                let count = rest
                    .trim()
                    .parse::<usize>()
                    .context("Invalid DrawCount")?;
                options.draw_mode = DrawMode::from_count(count)?;
            }
        }
        Ok(Self::from_board(board, options)?)
    }

    fn assemble(mut board: Board, options: Options) -> Self {
        // A loaded position may leave a tableau top face down.
        for tableau in board.tableaus.iter_mut() {
            tableau.flip_top_up();
        }
        let mut talon = TalonCycle::new(options.draw_mode, options.max_passes);
        talon.sync(&board.stock);
        let won = scan_for_win(&board.foundations);
        Self {
            talon,
            recorder: MovementRecorder::new(),
            scorekeeper: Scorekeeper::new(options.scoring, options.draw_mode, options.cumulative),
            listeners: Vec::new(),
            moves: 0,
            won,
            options,
            board,
        }
    }

    /// Deals a fresh board. Listeners and a cumulative score survive.
    pub fn new_game(&mut self) {
        self.new_game_with_rng(&mut rand::rng());
    }

    pub fn new_game_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = Board::deal(rng);
        self.talon.reset();
        self.talon.sync(&self.board.stock);
        self.recorder.clear();
        self.scorekeeper.new_game();
        self.moves = 0;
        self.won = false;
        log::info!("New game, draw {}", self.options.draw_mode);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.talon.draw_mode()
    }

    pub fn score(&self) -> i32 {
        self.scorekeeper.score()
    }

    /// Times the talon has been recycled in this game.
    pub fn passes(&self) -> u32 {
        self.talon.passes()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&MoveEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Whether `card` may be dropped on `pile` as the board stands.
    ///
    /// Only the placement rule for the destination is checked. Where the
    /// card comes from is not, so use [`Game::can_move`] to ask whether a
    /// particular transfer is legal.
    pub fn can_accept(&self, card: &Card, pile: PileId) -> bool {
        self.board.pile(pile).is_some_and(|p| p.can_accept(card))
    }

    /// Whether the top `count` cards of `from` may move onto `to`.
    pub fn can_move(&self, from: PileId, to: PileId, count: usize) -> bool {
        if from == to || count == 0 {
            return false;
        }
        let single_card_source = match from.kind() {
            PileKind::Stock => return false,
            PileKind::Talon | PileKind::Foundation => true,
            PileKind::Tableau => false,
        };
        let single_card_destination = match to.kind() {
            PileKind::Stock | PileKind::Talon => return false,
            PileKind::Foundation => {
                if from.kind() == PileKind::Foundation {
                    return false;
                }
                true
            }
            PileKind::Tableau => false,
        };
        if count > 1 && (single_card_source || single_card_destination) {
            return false;
        }
        let (Some(source), Some(destination)) = (self.board.pile(from), self.board.pile(to))
        else {
            return false;
        };
        if count > source.len() {
            return false;
        }
        let moving = &source.cards()[source.len() - count..];
        if !moving.iter().all(|c| c.is_face_up()) {
            return false;
        }
        let in_sequence = moving
            .windows(2)
            .all(|pair| rules::can_accept(PileKind::Tableau, &pair[1], Some(&pair[0])));
        in_sequence && destination.can_accept(&moving[0])
    }

    /// Moves the top `count` cards of `from` onto `to` if that is legal.
    pub fn try_move(&mut self, from: PileId, to: PileId, count: usize) -> Option<MoveEvent> {
        if !self.can_move(from, to, count) {
            log::debug!("Rejected move {from} -> {to} ({count})");
            return None;
        }
        let event = self.transfer(from, to, count)?;
        log::debug!("Moved {count} card(s) {from} -> {to}");
        self.after_move(event);
        Some(event)
    }

    /// One click on the stock: draws, recycles, or does nothing.
    pub fn draw(&mut self) -> TalonCardState {
        let step = self.talon.plan(&self.board.stock, &self.board.talon);
        let (from, to, count) = match step {
            TalonStep::Draw(count) => (PileId::Stock, PileId::Talon, count),
            TalonStep::Recycle(count) => (PileId::Talon, PileId::Stock, count),
            TalonStep::Idle => return TalonCardState::Empty,
        };
        if let Some(source) = self.board.pile(from) {
            self.recorder.record_move(from, source, to, count);
        }
        let state = self
            .talon
            .apply(step, &mut self.board.stock, &mut self.board.talon);
        self.after_move(MoveEvent {
            from: from.kind(),
            to: to.kind(),
            count,
            revealed: false,
            is_undo: false,
        });
        state
    }

    pub fn can_undo(&self) -> bool {
        self.recorder.can_undo()
    }

    /// Reverses the last recorded move. Does nothing if there is none.
    pub fn undo(&mut self) -> Option<MoveEvent> {
        let record = self.recorder.begin_undo()?;
        // Recording is locked, so this transfer is not itself undoable.
        self.transfer(record.destination, record.source, record.count);
        if let Some(source) = self.board.pile_mut(record.source) {
            source.restore(record.snapshot);
        }
        if record.source == PileId::Talon && record.destination == PileId::Stock {
            self.talon.undo_recycle();
        }
        self.talon.sync(&self.board.stock);
        self.recorder.finish_undo();
        log::debug!("Undid {} -> {}", record.source, record.destination);

        let event = MoveEvent {
            from: record.source.kind(),
            to: record.destination.kind(),
            count: record.count,
            revealed: record.revealed,
            is_undo: true,
        };
        self.after_move(event);
        Some(event)
    }

    pub fn scan_for_win(&self) -> bool {
        scan_for_win(&self.board.foundations)
    }

    /// First foundation that takes the top card of `from`.
    pub fn find_move_to_foundation(&self, from: PileId) -> Option<PileId> {
        PileId::foundations().find(|&to| self.can_move(from, to, 1))
    }

    /// First tableau, other than `from`, that takes the top `count` cards.
    pub fn find_move_to_tableau(&self, from: PileId, count: usize) -> Option<PileId> {
        PileId::tableaus().find(|&to| self.can_move(from, to, count))
    }

    /// Click-to-move: a single card goes to a foundation if it can,
    /// otherwise the cards go to the first tableau that takes them.
    pub fn auto_move(&mut self, from: PileId, count: usize) -> Option<PileId> {
        let to = (count == 1)
            .then(|| self.find_move_to_foundation(from))
            .flatten()
            .or_else(|| self.find_move_to_tableau(from, count))?;
        self.try_move(from, to, count).map(|_| to)
    }

    /// Every remaining card can be played straight to the foundations.
    pub fn can_autofinish(&self) -> bool {
        !self.won
            && self.board.stock.is_empty()
            && self.board.talon.len() <= 1
            && self
                .board
                .tableaus
                .iter()
                .all(|pile| pile.cards().iter().all(|card| card.is_face_up()))
    }

    /// Plays one card to a foundation. Returns `None` when nothing moved.
    pub fn autofinish_step(&mut self) -> Option<MoveEvent> {
        let from = std::iter::once(PileId::Talon)
            .chain(PileId::tableaus())
            .find(|&from| self.find_move_to_foundation(from).is_some())?;
        let to = self.find_move_to_foundation(from)?;
        self.try_move(from, to, 1)
    }

    /// Turns the talon back into the stock. Unlike [`Game::draw`] this never
    /// draws: it does nothing while the stock still holds cards.
    pub fn redeal(&mut self) -> bool {
        self.board.stock.is_empty() && self.draw() == TalonCardState::DeckPlayed
    }

    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Draw => self.draw() != TalonCardState::Empty,
            Action::Redeal => self.redeal(),
            Action::Move { from, to, count } => self.try_move(from, to, count).is_some(),
            Action::Undo => self.undo().is_some(),
        }
    }

    pub fn pretty_print(&self) -> String {
        format!(
            "{}DrawCount: {}",
            self.board.pretty_print(),
            self.talon.draw_mode()
        )
    }

    /// Moves cards between piles and records the move. While an undo is
    /// running the recorder ignores it and no card is revealed.
    fn transfer(&mut self, from: PileId, to: PileId, count: usize) -> Option<MoveEvent> {
        let source = self.board.pile(from)?;
        self.recorder.record_move(from, source, to, count);

        let cards = self.board.pile_mut(from)?.take(count);
        self.board.pile_mut(to)?.extend(cards);

        let mut revealed = false;
        if !self.recorder.is_locked()
            && from.kind() == PileKind::Tableau
            && let Some(source) = self.board.pile_mut(from)
        {
            revealed = source.flip_top_up();
            self.recorder.set_revealed(revealed);
        }

        Some(MoveEvent {
            from: from.kind(),
            to: to.kind(),
            count,
            revealed,
            is_undo: false,
        })
    }

    fn after_move(&mut self, event: MoveEvent) {
        if let Err(err) = self.board.verify() {
            panic!("Board invariant violated: {err}");
        }
        if event.is_undo {
            self.moves = self.moves.saturating_sub(1);
        } else {
            self.moves += 1;
        }
        self.scorekeeper.on_move(&event);
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
        if event.to == PileKind::Foundation || event.from == PileKind::Foundation {
            self.won = self.scan_for_win();
            if self.won && !event.is_undo {
                log::info!("Game won in {} moves, score {}", self.moves, self.score());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    const BOARD_STR: &str = r#"Stock: 5♦2♥8♦K♣7♥J♣
Talon: 7♦Q♥K♥T♦6♣9♥K♦J♠T♣Q♣3♣2♦Q♦8♥6♥7♠8♠
Foundation1: 2♣
Foundation3: A♠
Tableau1: |5♣
Tableau2: J♥|6♠
Tableau3: T♠5♥|Q♠
Tableau4: 9♠T♥2♠|9♣
Tableau5: 7♣4♥3♠|A♦
Tableau6: 3♥3♦4♣5♠4♦|8♣
Tableau7: 6♦4♠A♥9♦K♠|J♦
DrawCount: 3"#;

    fn game() -> Game {
        Game::parse(BOARD_STR, Options::default()).unwrap()
    }

    #[test]
    fn test_parse_and_print() {
        let game = game();
        assert_eq!(game.draw_mode(), DrawMode::Three);
        assert_eq!(game.pretty_print(), BOARD_STR);
        assert!(Game::parse("Stock: A♣", Options::default()).is_err());
        let bad_draw = BOARD_STR.replace("DrawCount: 3", "DrawCount: 2");
        assert!(Game::parse(&bad_draw, Options::default()).is_err());
    }

    #[test]
    fn test_move_reveals_and_undo_restores() {
        let mut game = game();
        // A♦ from Tableau5 to an empty foundation reveals 3♠.
        let before = game.board().clone();
        let event = game
            .try_move(PileId::Tableau(4), PileId::Foundation(1), 1)
            .unwrap();
        assert!(event.revealed);
        assert_eq!(game.score(), 15);
        assert!(game.board().tableaus[4].peek_top().unwrap().is_face_up());

        let undo = game.undo().unwrap();
        assert!(undo.is_undo);
        assert!(undo.revealed);
        assert_eq!(game.board(), &before);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 0);
        assert!(game.undo().is_none());
    }

    #[test]
    fn test_illegal_moves_change_nothing() {
        let mut game = game();
        let before = game.board().clone();
        assert!(game.try_move(PileId::Tableau(0), PileId::Tableau(0), 1).is_none());
        assert!(game.try_move(PileId::Stock, PileId::Talon, 1).is_none());
        assert!(game.try_move(PileId::Talon, PileId::Stock, 1).is_none());
        assert!(game.try_move(PileId::Tableau(1), PileId::Tableau(2), 2).is_none());
        assert!(game.try_move(PileId::Tableau(9), PileId::Tableau(2), 1).is_none());
        assert!(game.try_move(PileId::Foundation(0), PileId::Foundation(1), 1).is_none());
        assert_eq!(game.board(), &before);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_can_accept_is_pure() {
        let game = game();
        let card = Card::parse('8', '♥').unwrap();
        let first = game.can_accept(&card, PileId::Tableau(3));
        let second = game.can_accept(&card, PileId::Tableau(3));
        assert!(first);
        assert_eq!(first, second);
        assert_eq!(game.moves(), 0);
        assert!(!game.can_accept(&card, PileId::Tableau(12)));
    }

    #[test]
    fn test_draw_and_undo_draw() {
        let mut game = game();
        let before = game.board().clone();
        assert_eq!(game.draw(), TalonCardState::Normal);
        assert_eq!(game.board().stock.len(), 3);
        assert_eq!(game.board().talon.len(), 20);
        // K♣ was third from the stock top and lands face up on the talon.
        assert_eq!(game.board().talon.peek_top().unwrap().pretty_print(), "K♣");

        game.undo().unwrap();
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_undo_recycle() {
        let mut game = game();
        game.draw();
        game.draw();
        assert!(game.board().stock.is_empty());
        assert_eq!(game.draw(), TalonCardState::DeckPlayed);
        assert_eq!(game.passes(), 1);
        assert_eq!(game.board().stock.len(), 23);

        game.undo().unwrap();
        assert_eq!(game.passes(), 0);
        assert!(game.board().stock.is_empty());
        assert_eq!(game.board().talon.len(), 23);
        assert!(game.board().talon.cards().iter().all(|c| c.is_face_up()));
    }

    #[test]
    fn test_redeal_only_when_stock_empty() {
        let mut game = game();
        let before = game.board().clone();
        assert!(!game.apply(Action::Redeal));
        assert_eq!(game.board(), &before);

        game.draw();
        game.draw();
        assert!(game.board().stock.is_empty());
        assert!(game.apply(Action::Redeal));
        assert_eq!(game.passes(), 1);
        assert_eq!(game.board().stock.len(), 23);
    }

    #[test]
    fn test_listeners() {
        let mut game = game();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.subscribe(move |event| sink.borrow_mut().push(*event));

        game.try_move(PileId::Tableau(4), PileId::Foundation(1), 1);
        game.undo();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].from, PileKind::Tableau);
        assert_eq!(seen[0].to, PileKind::Foundation);
        assert!(!seen[0].is_undo);
        assert!(seen[1].is_undo);
    }

    #[test]
    fn test_auto_move() {
        let mut game = game();
        // 8♠ on the talon has no foundation to go to.
        assert_eq!(game.find_move_to_foundation(PileId::Talon), None);
        // A♦ goes to the first empty foundation.
        assert_eq!(
            game.auto_move(PileId::Tableau(4), 1),
            Some(PileId::Foundation(1))
        );
        // Q♠ finds no red King on top of a tableau.
        assert_eq!(game.find_move_to_tableau(PileId::Tableau(2), 1), None);
    }

    #[test]
    fn test_apply_actions() {
        let mut game = game();
        assert!(game.apply(Action::Draw));
        assert!(game.apply(Action::Undo));
        assert!(!game.apply(Action::Undo));
        assert!(game.apply(Action::single(PileId::Tableau(4), PileId::Foundation(1))));
    }
}
