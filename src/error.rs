use thiserror::Error;

/// Every way a game operation can be refused.
///
/// None of these are fatal: front ends show the message and keep the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("input must be exactly {expected} characters (got {actual})")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid characters detected")]
    InvalidCharacters,

    #[error("game is already over, start a new game")]
    GameAlreadyOver,

    #[error("word list is empty")]
    EmptyWordList,

    /// Target and guess handed to the feedback engine differ in length.
    #[error("cannot compare a {target}-letter target with a {guess}-letter guess")]
    InvalidInput { target: usize, guess: usize },
}
