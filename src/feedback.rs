use crate::error::GameError;
use crate::word::{ALPHABET_SIZE, Word, letter_index};
use std::fmt;

/// Classification of one guessed letter against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Exact,   // Green
    Present, // Yellow
    Absent,  // Gray
}

impl Verdict {
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Compare `guess` against `target`, one verdict per position.
///
/// Exact matches are claimed first. Each remaining target letter can then
/// satisfy at most one misplaced guess letter, scanning left to right, so
/// surplus copies of a repeated letter come back `Absent`.
///
/// # Errors
/// Returns [`GameError::InvalidInput`] if the words differ in length.
pub fn compute_feedback(target: &Word, guess: &Word) -> Result<Vec<Verdict>, GameError> {
    if target.len() != guess.len() {
        return Err(GameError::InvalidInput {
            target: target.len(),
            guess: guess.len(),
        });
    }

    let mut verdicts = vec![Verdict::Absent; guess.len()];
    let mut unmatched = [0usize; ALPHABET_SIZE];

    // First pass: exact matches
    for (i, (&t, &g)) in target.as_bytes().iter().zip(guess.as_bytes()).enumerate() {
        if t == g {
            verdicts[i] = Verdict::Exact;
        } else {
            unmatched[letter_index(t)] += 1;
        }
    }

    // Second pass: misplaced letters
    for (verdict, &g) in verdicts.iter_mut().zip(guess.as_bytes()) {
        if *verdict == Verdict::Exact {
            continue;
        }
        let remaining = &mut unmatched[letter_index(g)];
        if *remaining > 0 {
            *remaining -= 1;
            *verdict = Verdict::Present;
        }
    }

    Ok(verdicts)
}

/// Render verdicts as a `G`/`Y`/`-` string.
#[must_use]
pub fn verdict_string(verdicts: &[Verdict]) -> String {
    verdicts.iter().map(|v| v.symbol()).collect()
}
