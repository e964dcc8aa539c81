use crate::feedback::Verdict;
use crate::word::{ALPHABET_SIZE, Word, letter_index};

/// Keymap layout used by both front ends.
pub const KEYBOARD_ROWS: [&str; 3] = ["ABCDEFGHI", "JKLMNOPQR", "STUVWXYZ"];

/// Best-known status of a single letter.
///
/// Variants are declared in rank order, so `Ord` gives
/// `Unknown < Absent < Present < Exact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum KeyStatus {
    #[default]
    Unknown,
    Absent,
    Present,
    Exact,
}

impl From<Verdict> for KeyStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Exact => Self::Exact,
            Verdict::Present => Self::Present,
            Verdict::Absent => Self::Absent,
        }
    }
}

/// Per-letter status across every attempt of the current game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardStatus {
    keys: [KeyStatus; ALPHABET_SIZE],
}

impl KeyboardStatus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one attempt into the map. A letter only ever moves up in rank, so
    /// the order positions are visited in has no effect on the result.
    pub fn update(&mut self, guess: &Word, verdicts: &[Verdict]) {
        debug_assert_eq!(guess.len(), verdicts.len());
        for (&letter, &verdict) in guess.as_bytes().iter().zip(verdicts) {
            let key = &mut self.keys[letter_index(letter)];
            *key = (*key).max(KeyStatus::from(verdict));
        }
    }

    /// Status of `letter` (case-insensitive). Non-letters are always `Unknown`.
    #[must_use]
    pub fn get(&self, letter: char) -> KeyStatus {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            self.keys[letter_index(upper as u8)]
        } else {
            KeyStatus::Unknown
        }
    }

    /// Letters `A..=Z` with their status.
    pub fn iter(&self) -> impl Iterator<Item = (char, KeyStatus)> + '_ {
        (b'A'..=b'Z').zip(self.keys.iter()).map(|(l, &s)| (l as char, s))
    }
}
