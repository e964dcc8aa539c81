//! Full-screen terminal interface built on Ratatui.
//!
//! # Architecture
//! - `InputState`: key handling for the row being typed, independent of the terminal
//! - `TuiInterface`: owns the terminal, renders the board and implements `GameInterface`
//!
//! The screen is redrawn from the last `GameState` handed to `display_board`, so the
//! game loop stays the single owner of the state.

use crate::cli::{BANNER, attempts_line, outcome_lines};
use crate::error::GameError;
use crate::game_state::{GameInterface, GameState, MAX_ATTEMPTS, UserAction};
use crate::keyboard::{KEYBOARD_ROWS, KeyStatus};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
const INPUT_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// (background, foreground) for a letter tile.
fn tile_colors(status: KeyStatus) -> (Color, Color) {
    match status {
        KeyStatus::Exact => (Color::Green, Color::Black),
        KeyStatus::Present => (Color::Yellow, Color::Black),
        KeyStatus::Absent => (Color::Black, Color::DarkGray),
        KeyStatus::Unknown => (Color::Reset, Color::White),
    }
}

fn tile(letter: char, status: KeyStatus) -> Span<'static> {
    let (bg, fg) = tile_colors(status);
    Span::styled(format!(" {letter} "), Style::default().fg(fg).bg(bg))
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// The row currently being typed, plus the last error to show under the board.
#[derive(Debug, Default)]
pub struct InputState {
    buffer: String,
    error: Option<String>,
}

impl InputState {
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.error = None;
    }

    /// Apply one key press. Returns an action when the game loop has work to do.
    ///
    /// Enter submits whatever is typed so the game itself reports short input.
    pub fn handle_key(&mut self, key: KeyEvent, game: &GameState) -> Option<UserAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return Some(UserAction::Exit);
        }

        self.error = None;

        if game.is_over() {
            return match key.code {
                KeyCode::Char('n' | 'N') if !has_modifier_keys(&key) => Some(UserAction::NewGame),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(_) if has_modifier_keys(&key) => {
                debug_log!("handle_key() - Ignoring character with modifier: {:?}", key.modifiers);
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                if self.buffer.len() < game.target().len() {
                    self.buffer.push(c.to_ascii_uppercase());
                }
            }
            KeyCode::Char(c) => {
                self.error = Some(format!("Only letters are allowed! ('{c}' is not a letter)"));
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Enter => return Some(UserAction::Guess(self.buffer.clone())),
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }
}

/// Grid lines: played attempts, the row being typed, then empty rows.
fn grid_lines(game: &GameState, current_input: &str) -> Vec<Line<'static>> {
    let width = game.target().len();
    let mut lines = Vec::with_capacity(MAX_ATTEMPTS);

    for (i, attempt) in game.history().iter().enumerate() {
        let mut spans = vec![Span::styled(format!("[{}] ", i + 1), DIM_STYLE)];
        for (c, &v) in attempt.guess().as_str().chars().zip(attempt.verdicts()) {
            spans.push(tile(c, KeyStatus::from(v)));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    for row in game.attempts_used()..MAX_ATTEMPTS {
        let mut spans = vec![Span::styled(format!("[{}] ", row + 1), DIM_STYLE)];
        let is_input_row = row == game.attempts_used() && !game.is_over();
        for i in 0..width {
            if is_input_row {
                let letter = current_input.chars().nth(i).unwrap_or(' ');
                spans.push(Span::styled(format!(" {letter} "), INPUT_STYLE));
            } else {
                spans.push(Span::styled(" _ ", DIM_STYLE));
            }
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn keymap_lines(game: &GameState) -> Vec<Line<'static>> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| [tile(c, game.keyboard().get(c)), Span::raw(" ")])
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// One styled line per line of `message`; nothing for an empty message.
fn message_lines(message: &str) -> Vec<Line<'static>> {
    message
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), MESSAGE_STYLE)))
        .collect()
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    game: Option<&'a GameState>,
    input: &'a InputState,
    message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    input: InputState,
    snapshot: Option<GameState>,
    message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            input: InputState::default(),
            snapshot: None,
            message: String::new(),
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            game: self.snapshot.as_ref(),
            input: &self.input,
            message: &self.message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            log::warn!("Draw error: {e}");
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BANNER.len() as u16 + 2),        // Banner
                Constraint::Length(MAX_ATTEMPTS as u16 + 2),        // Grid
                Constraint::Length(KEYBOARD_ROWS.len() as u16 + 2), // Keymap
                Constraint::Min(3),                                 // Messages
                Constraint::Length(3),                              // Status line
                Constraint::Length(3),                              // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        if let Some(game) = ctx.game {
            Self::render_grid(f, chunks[1], game, ctx.input.buffer());
            Self::render_keymap(f, chunks[2], game);
        }
        Self::render_messages(f, chunks[3], ctx.message, ctx.input.error());
        Self::render_status(f, chunks[4], ctx.game, ctx.status);
        Self::render_instructions(f, chunks[5], ctx.game.is_some_and(GameState::is_over));
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let banner: Vec<Line> = BANNER.iter().map(|&l| Line::from(l)).collect();
        let title = Paragraph::new(banner)
            .style(HEADER_STYLE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_grid(f: &mut Frame, area: Rect, game: &GameState, current_input: &str) {
        let paragraph = Paragraph::new(grid_lines(game, current_input))
            .alignment(Alignment::Center)
            .block(Block::default().title("Guesses").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_keymap(f: &mut Frame, area: Rect, game: &GameState) {
        let paragraph = Paragraph::new(keymap_lines(game))
            .alignment(Alignment::Center)
            .block(Block::default().title("-- keymap --").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: Option<&str>) {
        let mut lines = message_lines(message);
        if let Some(error) = error_message {
            lines.push(Line::from(Span::styled(format!("error: {error}"), ERROR_STYLE)));
        }
        lines.push(Line::from(vec![
            Span::styled(" G ", Style::new().fg(Color::Black).bg(Color::Green)),
            Span::raw(" exact  "),
            Span::styled(" Y ", Style::new().fg(Color::Black).bg(Color::Yellow)),
            Span::raw(" wrong position  "),
            Span::styled(" - ", DIM_STYLE),
            Span::raw(" not in word"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, game: Option<&GameState>, status: &str) {
        let text = match game {
            Some(game) => format!("{} | {status}", attempts_line(game)),
            None => status.to_string(),
        };
        let paragraph = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, game_over: bool) {
        let text = if game_over {
            "N: New Game | ESC: Quit"
        } else {
            "Type your guess | ENTER: Submit | BACKSPACE: Delete | ESC: Quit"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Wait briefly for a key press, filtering out everything else.
    fn poll_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Replacement and control characters show up from escape sequences when alt-tabbing
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("poll_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("poll_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_board(&mut self, game: &GameState) {
        self.snapshot = Some(game.clone());
        self.input.clear();
        self.draw_or_log();
    }

    fn read_action(&mut self, game: &GameState) -> Option<UserAction> {
        loop {
            if let Err(e) = self.draw() {
                log::error!("Draw failed, leaving: {e}");
                return Some(UserAction::Exit);
            }

            match Self::poll_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.input.handle_key(key, game) {
                        info_log!("read_action() - Action received: {:?}", action);
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Error reading terminal events: {e}");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_error(&mut self, error: &GameError) {
        self.input.set_error(error.to_string());
        self.draw_or_log();
    }

    fn display_outcome(&mut self, game: &GameState) {
        if let Some(lines) = outcome_lines(game) {
            self.message = lines.join("\n");
        }
        self.status = "Game over".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.input.clear();
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
