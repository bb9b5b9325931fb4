use thiserror::Error;

use crate::types::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid must have at least one row and one column, got {rows}x{cols}")]
    InvalidGridSize { rows: Coord, cols: Coord },
    #[error("Grid {rows}x{cols} has an odd number of cards, every card needs a pair")]
    OddCardCount { rows: Coord, cols: Coord },
    #[error("Invalid position")]
    InvalidPosition,
    #[error("Deck must hold exactly two cards of each symbol")]
    InvalidDeck,
    #[error("Deck has {actual} cards but the grid needs {expected}")]
    DeckSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not access the score file")]
    Io(#[from] std::io::Error),
    #[error("Score file is not a valid record list")]
    Json(#[from] serde_json::Error),
}
