use thiserror::Error;

use crate::game::{Action, RoundState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot draw from an empty deck")]
    EmptyDeck,
    #[error("Cannot {action} while the round is {state}")]
    InvalidAction { action: Action, state: RoundState },
    #[error("No card at position {index} in a hand of {len}")]
    InvalidCardIndex { index: usize, len: usize },
}
