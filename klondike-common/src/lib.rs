//! Rules and state engine for Klondike Solitaire: move legality, single-step
//! undo, the stock/talon draw cycle and win detection.
pub mod action;
pub mod board;
pub mod card;
pub mod error;
pub mod game;
pub mod options;
pub mod pile;
pub mod recorder;
pub mod rules;
pub mod score;
pub mod talon;
pub mod win;

pub use crate::error::{BoardError, OptionError};
pub use crate::game::{Game, MoveEvent};
pub use crate::options::{DrawMode, Options, ScoringMode};
pub use crate::talon::TalonCardState;
