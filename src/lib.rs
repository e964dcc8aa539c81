// Library interface for wordgrep
// Exposes the game core and both front ends to the binary and integration tests

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod keyboard;
pub mod logging;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use feedback::{Verdict, compute_feedback};
pub use game_state::{
    Attempt, GameInterface, GameState, GameStatus, MAX_ATTEMPTS, SessionStats, UserAction,
    choose_target, game_loop, reset_game,
};
pub use keyboard::{KeyStatus, KeyboardStatus};
pub use word::{WORD_LENGTH, Word};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str, resolve_wordbank};
