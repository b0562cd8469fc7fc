use thiserror::Error;

use crate::types::CardId;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("A {rows}x{columns} grid cannot be dealt: it needs an even number of cards, at least 2")]
    InvalidGrid { rows: u16, columns: u16 },
    #[error("Deck holds {actual} cards but a {rows}x{columns} grid needs {expected}")]
    DeckSizeMismatch {
        rows: u16,
        columns: u16,
        expected: usize,
        actual: usize,
    },
    #[error("Card id {id} appears {count} times in the deck, expected exactly 2")]
    UnpairedCard { id: CardId, count: usize },
    #[error("Matched id {id} is not on the deck")]
    UnknownMatchedId { id: CardId },
}

pub type Result<T> = core::result::Result<T, GridError>;
