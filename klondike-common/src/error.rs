use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Expected 52 cards on the board, found {0}")]
    CardCount(usize),

    #[error("Card {0} appears more than once")]
    DuplicateCard(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Draw count must be 1 or 3, got '{0}'")]
    InvalidDrawMode(String),

    #[error("Unknown scoring mode '{0}' (expected standard, vegas or none)")]
    InvalidScoring(String),
}
