use crate::error::GameError;
use crate::game_state::{GameInterface, GameState, GameStatus, MAX_ATTEMPTS, UserAction};
use crate::keyboard::{KEYBOARD_ROWS, KeyStatus};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Terminal word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of 5-letter words
    #[arg(short = 'w', long = "words")]
    pub wordbank_path: Option<PathBuf>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Seed for target selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log (defaults to the user cache directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Text rendering shared with the TUI

/// One grid cell: `[A]` exact, `(A)` misplaced, ` a ` absent, ` A ` untried.
#[must_use]
pub fn format_cell(letter: char, status: KeyStatus) -> String {
    match status {
        KeyStatus::Exact => format!("[{letter}]"),
        KeyStatus::Present => format!("({letter})"),
        KeyStatus::Absent => format!(" {} ", letter.to_ascii_lowercase()),
        KeyStatus::Unknown => format!(" {letter} "),
    }
}

#[must_use]
pub fn attempts_line(game: &GameState) -> String {
    format!(
        "attempts remaining: {}/{MAX_ATTEMPTS}",
        game.attempts_remaining()
    )
}

/// Grid rows: one per attempt, then blank rows for unused attempts.
#[must_use]
pub fn render_grid(game: &GameState) -> Vec<String> {
    let mut rows = Vec::with_capacity(MAX_ATTEMPTS);
    for (i, attempt) in game.history().iter().enumerate() {
        let cells: String = attempt
            .guess()
            .as_str()
            .chars()
            .zip(attempt.verdicts())
            .map(|(c, &v)| format_cell(c, KeyStatus::from(v)))
            .collect();
        rows.push(format!("[{}] {cells}", i + 1));
    }
    for i in game.attempts_used()..MAX_ATTEMPTS {
        rows.push(format!("[{}] {}", i + 1, " _ ".repeat(game.target().len())));
    }
    rows
}

#[must_use]
pub fn render_keymap(game: &GameState) -> Vec<String> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| format_cell(c, game.keyboard().get(c)))
                .collect::<String>()
        })
        .collect()
}

/// Banner shown above the board.
pub const BANNER: [&str; 6] = [
    r"      _    _               _  ____                  ",
    r"     | |  | |             | |/ ___|_ __ ___ _ __    ",
    r"    | |  | | ___  _ __ __| | |  _| '__/ _ \ '_ \  ",
    r"    | |/\| |/ _ \| '__/ _` | |_| | | |  __/ |_) | ",
    r"    \  /\  / (_) | | | (_| |\____|_|  \___| .__/",
    r"     \/  \/ \___/|_|  \__,_|             |_|    ",
];

/// Result box for a finished game, `None` while it is still running.
///
/// Reads like a shell session: the grep command, the verdict, the exit code.
#[must_use]
pub fn outcome_lines(game: &GameState) -> Option<Vec<String>> {
    match game.status() {
        GameStatus::Won => Some(vec![
            format!("$ grep \"{}\" --result", game.target()),
            format!(
                "MATCH FOUND in {}/{MAX_ATTEMPTS} attempts",
                game.attempts_used()
            ),
            "process exited with code 0".to_string(),
        ]),
        GameStatus::Lost => Some(vec![
            format!("$ grep \"{}\" --result", "?".repeat(game.target().len())),
            format!("NO MATCH - word was: {}", game.target()),
            "process exited with code 1".to_string(),
        ]),
        GameStatus::InProgress => None,
    }
}

fn parse_action(line: &str) -> UserAction {
    let input = line.trim();
    match input.to_ascii_lowercase().as_str() {
        "exit" => UserAction::Exit,
        "new" | "next" => UserAction::NewGame,
        _ => UserAction::Guess(input.to_string()),
    }
}

/// Line-based implementation of [`GameInterface`] over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Hand back the writer, e.g. to inspect captured output.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.writer, "{text}") {
            log::warn!("Failed to write to output: {e}");
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_board(&mut self, game: &GameState) {
        self.emit("");
        self.emit(&attempts_line(game));
        for row in render_grid(game) {
            self.emit(&row);
        }
        self.emit("-- keymap --");
        for row in render_keymap(game) {
            self.emit(&row);
        }
    }

    fn read_action(&mut self, game: &GameState) -> Option<UserAction> {
        let prompt = if game.is_over() {
            "$ type 'new' to play again or 'exit' to quit:"
        } else {
            "$ enter guess ('new' restarts, 'exit' quits):"
        };
        self.emit(prompt);
        if let Err(e) = self.writer.flush() {
            log::warn!("Failed to flush output: {e}");
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(parse_action(&line)),
            Err(e) => {
                log::error!("Failed to read input: {e}");
                None
            }
        }
    }

    fn display_error(&mut self, error: &GameError) {
        self.emit(&format!("error: {error}"));
    }

    fn display_outcome(&mut self, game: &GameState) {
        for line in outcome_lines(game).unwrap_or_default() {
            self.emit(&line);
        }
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        for line in BANNER {
            self.emit(line);
        }
        self.emit(&format!("New game started. Loaded {word_count} words."));
        self.emit("[A] exact   (A) wrong position   a not in word");
    }

    fn display_exit_message(&mut self) {
        self.emit("Exiting.");
    }
}
