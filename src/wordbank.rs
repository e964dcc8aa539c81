use crate::word::{WORD_LENGTH, Word};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words_5letter.txt");

/// Word list picked up from the working directory when no path is given.
pub const DEFAULT_WORDBANK_FILE: &str = "words_5letter.txt";

fn parse_word(line: &str) -> Option<Word> {
    let trimmed = line.trim();
    if trimmed.len() != WORD_LENGTH {
        return None;
    }
    Word::new(trimmed).ok()
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(parse_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Word list for a session.
///
/// An explicit `path` must load. Without one, [`DEFAULT_WORDBANK_FILE`] in the
/// working directory is tried, and the embedded list is used if that file is
/// missing, unreadable or holds no usable words.
pub fn resolve_wordbank(path: Option<&Path>) -> io::Result<Vec<Word>> {
    if let Some(path) = path {
        let words = load_wordbank_from_file(path)?;
        log::info!("Loaded {} words from {}", words.len(), path.display());
        return Ok(words);
    }

    match load_wordbank_from_file(DEFAULT_WORDBANK_FILE) {
        Ok(words) if !words.is_empty() => {
            log::info!("Loaded {} words from {DEFAULT_WORDBANK_FILE}", words.len());
            Ok(words)
        }
        Ok(_) => {
            log::warn!("{DEFAULT_WORDBANK_FILE} has no usable words, using embedded list");
            Ok(load_wordbank_from_str(EMBEDDED_WORDBANK))
        }
        Err(e) => {
            log::info!("{DEFAULT_WORDBANK_FILE} not available ({e}), using embedded list");
            Ok(load_wordbank_from_str(EMBEDDED_WORDBANK))
        }
    }
}
