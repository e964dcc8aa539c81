//! Validated guess/target words.

use crate::error::GameError;
use std::fmt;

/// Length of every word in the game.
pub const WORD_LENGTH: usize = 5;

/// Number of letters on the keyboard.
pub const ALPHABET_SIZE: usize = 26;

/// An uppercase ASCII word.
///
/// The feedback engine works for any length; the game itself only ever builds
/// [`WORD_LENGTH`]-letter targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

impl Word {
    /// Upper-case `text` and check that it only holds ASCII letters.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidCharacters`] if any character is not an ASCII letter.
    pub fn new(text: &str) -> Result<Self, GameError> {
        if !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(GameError::InvalidCharacters);
        }
        Ok(Self {
            text: text.to_ascii_uppercase(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Alphabet index of an uppercase ASCII letter.
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_uppercase());
    usize::from(letter - b'A')
}
