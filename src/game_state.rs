use crate::error::GameError;
use crate::feedback::{Verdict, compute_feedback, verdict_string};
use crate::keyboard::KeyboardStatus;
use crate::word::Word;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Guesses allowed per game.
pub const MAX_ATTEMPTS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One accepted guess and its verdicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    guess: Word,
    verdicts: Vec<Verdict>,
}

impl Attempt {
    #[must_use]
    pub fn guess(&self) -> &Word {
        &self.guess
    }

    #[must_use]
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.verdicts.iter().all(|&v| v == Verdict::Exact)
    }
}

/// State of a single game. Owned by the caller and replaced on reset.
#[derive(Debug, Clone)]
pub struct GameState {
    target: Word,
    history: Vec<Attempt>,
    keyboard: KeyboardStatus,
    status: GameStatus,
}

impl GameState {
    #[must_use]
    pub fn new(target: Word) -> Self {
        Self {
            target,
            history: Vec::with_capacity(MAX_ATTEMPTS),
            keyboard: KeyboardStatus::new(),
            status: GameStatus::InProgress,
        }
    }

    #[must_use]
    pub fn target(&self) -> &Word {
        &self.target
    }

    #[must_use]
    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardStatus {
        &self.keyboard
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[must_use]
    pub fn attempts_used(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        MAX_ATTEMPTS - self.history.len()
    }

    /// Validate `input` and, if it is acceptable, play it.
    ///
    /// Checks run in order: the game must still be in progress, the input must
    /// have as many characters as the target, and every character must be a
    /// letter. A rejected guess leaves the state untouched.
    ///
    /// # Errors
    /// [`GameError::GameAlreadyOver`], [`GameError::InvalidLength`] or
    /// [`GameError::InvalidCharacters`].
    pub fn submit_guess(&mut self, input: &str) -> Result<&Attempt, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }

        let actual = input.chars().count();
        if actual != self.target.len() {
            return Err(GameError::InvalidLength {
                expected: self.target.len(),
                actual,
            });
        }

        let guess = Word::new(input)?;
        let verdicts = compute_feedback(&self.target, &guess)?;
        self.keyboard.update(&guess, &verdicts);
        debug_log!("submit_guess() - {} -> {}", guess, verdict_string(&verdicts));

        let attempt = Attempt { guess, verdicts };
        let solved = attempt.is_solved();
        self.history.push(attempt);

        if solved {
            self.status = GameStatus::Won;
        } else if self.history.len() >= MAX_ATTEMPTS {
            self.status = GameStatus::Lost;
        }

        Ok(&self.history[self.history.len() - 1])
    }
}

/// Pick a target uniformly at random.
///
/// # Errors
/// Returns [`GameError::EmptyWordList`] if `words` is empty.
pub fn choose_target<R: Rng + ?Sized>(words: &[Word], rng: &mut R) -> Result<Word, GameError> {
    words.choose(rng).cloned().ok_or(GameError::EmptyWordList)
}

/// A fresh game with a newly chosen target.
///
/// # Errors
/// Returns [`GameError::EmptyWordList`] if `words` is empty.
pub fn reset_game<R: Rng + ?Sized>(words: &[Word], rng: &mut R) -> Result<GameState, GameError> {
    let target = choose_target(words, rng)?;
    debug_log!("reset_game() - target is {}", target);
    Ok(GameState::new(target))
}

/// What the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

/// Front-end side of the game loop.
pub trait GameInterface {
    /// Show the grid and keymap for `game`.
    fn display_board(&mut self, game: &GameState);

    /// Block until the player does something. `None` means input is closed.
    fn read_action(&mut self, game: &GameState) -> Option<UserAction>;

    fn display_error(&mut self, error: &GameError);

    /// Called once when `game` reaches `Won` or `Lost`.
    fn display_outcome(&mut self, game: &GameState);

    fn display_new_game_message(&mut self, word_count: usize);

    fn display_exit_message(&mut self);
}

/// Games finished during one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub won: usize,
    pub lost: usize,
}

impl SessionStats {
    #[must_use]
    pub fn played(&self) -> usize {
        self.won + self.lost
    }

    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won => self.won += 1,
            GameStatus::Lost => self.lost += 1,
            GameStatus::InProgress => {}
        }
    }
}

/// Play games against `interface` until it asks to exit or runs out of input.
///
/// # Errors
/// Returns [`GameError::EmptyWordList`] if `words` is empty.
pub fn game_loop<I, R>(
    words: &[Word],
    interface: &mut I,
    rng: &mut R,
) -> Result<SessionStats, GameError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut stats = SessionStats::default();
    let mut game = reset_game(words, rng)?;
    log::info!("New game started with {} candidate words", words.len());
    interface.display_new_game_message(words.len());
    interface.display_board(&game);

    loop {
        let Some(action) = interface.read_action(&game) else {
            log::info!("Input closed, ending session");
            break;
        };
        info_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                game = reset_game(words, rng)?;
                log::info!("New game started with {} candidate words", words.len());
                interface.display_new_game_message(words.len());
                interface.display_board(&game);
            }
            UserAction::Guess(input) => match game.submit_guess(&input) {
                Ok(attempt) => {
                    log::info!(
                        "Accepted guess {} ({})",
                        attempt.guess(),
                        verdict_string(attempt.verdicts())
                    );
                    interface.display_board(&game);
                    if game.is_over() {
                        log::info!(
                            "Game over: {:?} after {} attempts",
                            game.status(),
                            game.attempts_used()
                        );
                        stats.record(game.status());
                        interface.display_outcome(&game);
                    }
                }
                Err(e) => {
                    log::warn!("Rejected guess {input:?}: {e}");
                    interface.display_error(&e);
                }
            },
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn game(target: &str) -> GameState {
        GameState::new(word(target))
    }

    #[test]
    fn test_initial_state() {
        let state = game("CRANE");
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.history().is_empty());
        assert_eq!(state.attempts_remaining(), MAX_ATTEMPTS);
        assert!(state.keyboard().iter().all(|(_, s)| s == crate::keyboard::KeyStatus::Unknown));
    }

    #[test]
    fn test_crane_scenario_won_in_three() {
        let mut state = game("CRANE");

        let first = state.submit_guess("SLATE").unwrap();
        assert_eq!(verdict_string(first.verdicts()), "--G-G");
        assert_eq!(state.status(), GameStatus::InProgress);

        state.submit_guess("TRACE").unwrap();
        assert_eq!(state.status(), GameStatus::InProgress);

        let third = state.submit_guess("CRANE").unwrap();
        assert!(third.is_solved());
        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(state.attempts_used(), 3);
    }

    #[test]
    fn test_anagram_is_not_a_win() {
        let mut state = game("LEMON");
        let attempt = state.submit_guess("MELON").unwrap();
        assert!(!attempt.is_solved());
        assert_eq!(state.status(), GameStatus::InProgress);

        let attempt = state.submit_guess("LEMON").unwrap();
        assert!(attempt.is_solved());
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_six_misses_lose() {
        let mut state = game("CRANE");
        for (i, guess) in ["SLATE", "TRACE", "BRINE", "PLANT", "CRATE", "CRANK"]
            .iter()
            .enumerate()
        {
            assert_eq!(state.status(), GameStatus::InProgress);
            state.submit_guess(guess).unwrap();
            assert_eq!(state.attempts_used(), i + 1);
        }
        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(state.attempts_remaining(), 0);
    }

    #[test]
    fn test_win_on_last_attempt_is_won() {
        let mut state = game("CRANE");
        for guess in ["SLATE", "TRACE", "BRINE", "PLANT", "CRATE"] {
            state.submit_guess(guess).unwrap();
        }
        state.submit_guess("CRANE").unwrap();
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_submit_after_game_over_rejected() {
        let mut state = game("CRANE");
        state.submit_guess("CRANE").unwrap();
        assert_eq!(state.submit_guess("SLATE"), Err(GameError::GameAlreadyOver));
        // Game-over check comes before any input validation
        assert_eq!(state.submit_guess("x"), Err(GameError::GameAlreadyOver));
        assert_eq!(state.history().len(), 1);

        let mut lost = game("CRANE");
        for _ in 0..MAX_ATTEMPTS {
            lost.submit_guess("SLATE").unwrap();
        }
        assert_eq!(lost.submit_guess("CRANE"), Err(GameError::GameAlreadyOver));
        assert_eq!(lost.history().len(), MAX_ATTEMPTS);
        assert_eq!(lost.status(), GameStatus::Lost);
    }

    #[test]
    fn test_validation_order_and_no_state_change() {
        let mut state = game("CRANE");
        assert_eq!(
            state.submit_guess("AB1"),
            Err(GameError::InvalidLength {
                expected: 5,
                actual: 3
            })
        );
        assert_eq!(
            state.submit_guess("CRANES"),
            Err(GameError::InvalidLength {
                expected: 5,
                actual: 6
            })
        );
        assert_eq!(state.submit_guess("CR4NE"), Err(GameError::InvalidCharacters));
        assert_eq!(state.submit_guess("CR NE"), Err(GameError::InvalidCharacters));
        // Multi-byte characters count once toward the length
        assert_eq!(state.submit_guess("CRÄNE"), Err(GameError::InvalidCharacters));
        assert!(state.history().is_empty());
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.keyboard(), &KeyboardStatus::new());
    }

    #[test]
    fn test_lowercase_guess_accepted() {
        let mut state = game("CRANE");
        let attempt = state.submit_guess("crane").unwrap();
        assert_eq!(attempt.guess().as_str(), "CRANE");
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_choose_target() {
        let words = vec![word("CRANE"), word("SLATE"), word("TRACE")];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let target = choose_target(&words, &mut rng).unwrap();
            assert!(words.contains(&target));
        }
        assert_eq!(choose_target(&[], &mut rng), Err(GameError::EmptyWordList));
    }

    #[test]
    fn test_choose_target_reaches_every_word() {
        let words = vec![word("CRANE"), word("SLATE"), word("TRACE")];
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(choose_target(&words, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), words.len());
    }

    #[test]
    fn test_reset_game_is_fresh() {
        let words = vec![word("CRANE")];
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = reset_game(&words, &mut rng).unwrap();
        state.submit_guess("CRANE").unwrap();
        assert!(state.is_over());

        let state = reset_game(&words, &mut rng).unwrap();
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.history().is_empty());
        assert_eq!(state.keyboard(), &KeyboardStatus::new());
        assert!(reset_game(&[], &mut rng).is_err());
    }

    /// Scripted interface that records what the loop showed.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<UserAction>,
        errors: Vec<GameError>,
        outcomes: Vec<GameStatus>,
        boards: usize,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: &[UserAction]) -> Self {
            Self {
                actions: actions.iter().cloned().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_board(&mut self, _game: &GameState) {
            self.boards += 1;
        }

        fn read_action(&mut self, _game: &GameState) -> Option<UserAction> {
            self.actions.pop_front()
        }

        fn display_error(&mut self, error: &GameError) {
            self.errors.push(error.clone());
        }

        fn display_outcome(&mut self, game: &GameState) {
            self.outcomes.push(game.status());
        }

        fn display_new_game_message(&mut self, _word_count: usize) {
            self.new_games += 1;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn guess(s: &str) -> UserAction {
        UserAction::Guess(s.to_string())
    }

    #[test]
    fn test_game_loop_win_then_exit() {
        let words = vec![word("CRANE")];
        let mut interface =
            ScriptedInterface::new(&[guess("slate"), guess("crane"), UserAction::Exit]);
        let mut rng = StdRng::seed_from_u64(0);

        let stats = game_loop(&words, &mut interface, &mut rng).unwrap();

        assert_eq!(stats, SessionStats { won: 1, lost: 0 });
        assert_eq!(interface.outcomes, vec![GameStatus::Won]);
        assert_eq!(interface.boards, 3);
        assert!(interface.errors.is_empty());
        assert!(interface.exited);
    }

    #[test]
    fn test_game_loop_reports_errors() {
        let words = vec![word("CRANE")];
        let mut interface = ScriptedInterface::new(&[
            guess("CRAN"),
            guess("CR4NE"),
            guess("CRANE"),
            guess("SLATE"),
        ]);
        let mut rng = StdRng::seed_from_u64(0);

        let stats = game_loop(&words, &mut interface, &mut rng).unwrap();

        assert_eq!(stats.played(), 1);
        assert_eq!(
            interface.errors,
            vec![
                GameError::InvalidLength {
                    expected: 5,
                    actual: 4
                },
                GameError::InvalidCharacters,
                GameError::GameAlreadyOver,
            ]
        );
        // Input ran out without an explicit exit
        assert!(!interface.exited);
    }

    #[test]
    fn test_game_loop_new_game_after_loss() {
        let words = vec![word("CRANE")];
        let mut actions = vec![guess("SLATE"); MAX_ATTEMPTS];
        actions.push(UserAction::NewGame);
        actions.push(guess("CRANE"));
        actions.push(UserAction::Exit);
        let mut interface = ScriptedInterface::new(&actions);
        let mut rng = StdRng::seed_from_u64(0);

        let stats = game_loop(&words, &mut interface, &mut rng).unwrap();

        assert_eq!(stats, SessionStats { won: 1, lost: 1 });
        assert_eq!(interface.outcomes, vec![GameStatus::Lost, GameStatus::Won]);
        assert_eq!(interface.new_games, 2);
    }

    #[test]
    fn test_game_loop_empty_word_list() {
        let mut interface = ScriptedInterface::new(&[UserAction::Exit]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            game_loop(&[], &mut interface, &mut rng),
            Err(GameError::EmptyWordList)
        );
    }
}
