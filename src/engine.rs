use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::debug_log;

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 100;
pub const VERY_CLOSE_RANGE: u8 = 5;
pub const CLOSE_RANGE: u8 = 15;

/// Proximity hint reported after a guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    VeryClose,
    Close,
    Low,
    High,
}

impl Feedback {
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Display tier of a past guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryTier {
    Exact,
    VeryClose,
    Close,
    Far,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
}

impl GameStatus {
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub feedback: Feedback,
    pub won: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    #[error("Please enter a number between 1 and 100.")]
    InvalidInput,
    #[error("You already tried {0}. Try something else.")]
    DuplicateGuess(u8),
    #[error("You already found the number. Start a new game to keep playing.")]
    RoundOver,
}

impl GuessError {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid Input",
            Self::DuplicateGuess(_) => "Repeated Guess",
            Self::RoundOver => "Round Over",
        }
    }
}

/// Parse raw user text into a guess in `MIN_NUMBER..=MAX_NUMBER`.
///
/// Reads the leading integer after any whitespace and ignores the rest, so
/// "12abc" is 12 and "4.5" is 4. Text without leading digits is invalid.
pub fn parse_guess(raw: &str) -> Result<u8, GuessError> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || negative {
        // no number at all, or one below the range
        return Err(GuessError::InvalidInput);
    }

    unsigned[..digits]
        .parse::<u64>()
        .ok()
        .and_then(|v| u8::try_from(v).ok())
        .filter(|v| (MIN_NUMBER..=MAX_NUMBER).contains(v))
        .ok_or(GuessError::InvalidInput)
}

/// Feedback for `value` against `target`. Equality wins over the proximity
/// bands, and the bands win over direction.
pub fn evaluate_guess(value: u8, target: u8) -> Feedback {
    let diff = value.abs_diff(target);
    if diff == 0 {
        Feedback::Correct
    } else if diff <= VERY_CLOSE_RANGE {
        Feedback::VeryClose
    } else if diff <= CLOSE_RANGE {
        Feedback::Close
    } else if value < target {
        Feedback::Low
    } else {
        Feedback::High
    }
}

pub fn classify_guess(value: u8, target: u8) -> HistoryTier {
    match value.abs_diff(target) {
        0 => HistoryTier::Exact,
        d if d <= VERY_CLOSE_RANGE => HistoryTier::VeryClose,
        d if d <= CLOSE_RANGE => HistoryTier::Close,
        _ => HistoryTier::Far,
    }
}

/// One round of the game: a hidden target plus the guesses made against it.
///
/// The engine owns its RNG so `reset` can draw a fresh target without any
/// shared state. Attempts are the length of the history.
#[derive(Clone, Debug)]
pub struct GameEngine {
    rng: SmallRng,
    target: u8,
    history: Vec<u8>,
    feedback: Option<Feedback>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_rng(&mut rand::rng()))
    }

    /// Reproducible rounds for a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    /// Start the first round with a known target. Later rounds are random.
    pub fn with_target(target: u8) -> Result<Self, GuessError> {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&target) {
            return Err(GuessError::InvalidInput);
        }
        let mut engine = Self::new();
        engine.target = target;
        Ok(engine)
    }

    fn from_rng(mut rng: SmallRng) -> Self {
        let target = rng.random_range(MIN_NUMBER..=MAX_NUMBER);
        Self {
            rng,
            target,
            history: Vec::new(),
            feedback: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.feedback {
            Some(Feedback::Correct) => GameStatus::Won,
            _ => GameStatus::Playing,
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn history(&self) -> &[u8] {
        &self.history
    }

    pub fn attempts(&self) -> usize {
        self.history.len()
    }

    /// The target, once it has been found.
    pub fn revealed_target(&self) -> Option<u8> {
        self.status().is_won().then_some(self.target)
    }

    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GuessError> {
        let value = parse_guess(raw)?;
        if self.status().is_won() {
            return Err(GuessError::RoundOver);
        }
        if self.history.contains(&value) {
            return Err(GuessError::DuplicateGuess(value));
        }

        self.history.push(value);
        let feedback = evaluate_guess(value, self.target);
        self.feedback = Some(feedback);
        debug_log!(
            "submit_guess() - {} -> {:?} after {} attempts",
            value,
            feedback,
            self.attempts()
        );

        Ok(GuessOutcome {
            feedback,
            won: feedback.is_correct(),
        })
    }

    pub fn reset(&mut self) {
        self.target = self.rng.random_range(MIN_NUMBER..=MAX_NUMBER);
        self.history.clear();
        self.feedback = None;
        debug_log!("reset() - new round started");
    }

    pub fn classify_history_entry(&self, value: u8) -> HistoryTier {
        classify_guess(value, self.target)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(target: u8) -> GameEngine {
        GameEngine::with_target(target).unwrap()
    }

    #[test]
    fn test_parse_guess_accepts_range_bounds() {
        assert_eq!(parse_guess("1"), Ok(1));
        assert_eq!(parse_guess("100"), Ok(100));
        assert_eq!(parse_guess("  42\n"), Ok(42));
        assert_eq!(parse_guess("+7"), Ok(7));
        assert_eq!(parse_guess("007"), Ok(7));
    }

    #[test]
    fn test_parse_guess_reads_leading_integer() {
        assert_eq!(parse_guess("12abc"), Ok(12));
        assert_eq!(parse_guess("4.5"), Ok(4));
        assert_eq!(parse_guess(" 99 bottles"), Ok(99));
    }

    #[test]
    fn test_parse_guess_rejects_bad_input() {
        for raw in [
            "", "   ", "abc", "a12", ".5", "+", "-", "0", "101", "-5", "-0", "150abc",
            "99999999999999999999",
        ] {
            assert_eq!(parse_guess(raw), Err(GuessError::InvalidInput), "{raw:?}");
        }
    }

    #[test]
    fn test_leading_integer_guess_counts_as_its_value() {
        let mut engine = engine_with(50);
        assert_eq!(engine.submit_guess("12abc").unwrap().feedback, Feedback::Low);
        assert_eq!(engine.submit_guess("4.5").unwrap().feedback, Feedback::Low);
        assert_eq!(engine.history(), &[12, 4]);
        assert_eq!(engine.submit_guess("12"), Err(GuessError::DuplicateGuess(12)));
    }

    #[test]
    fn test_evaluate_guess_bands() {
        assert_eq!(evaluate_guess(50, 50), Feedback::Correct);
        assert_eq!(evaluate_guess(55, 50), Feedback::VeryClose);
        assert_eq!(evaluate_guess(45, 50), Feedback::VeryClose);
        assert_eq!(evaluate_guess(47, 50), Feedback::VeryClose);
        assert_eq!(evaluate_guess(65, 50), Feedback::Close);
        assert_eq!(evaluate_guess(35, 50), Feedback::Close);
        assert_eq!(evaluate_guess(34, 50), Feedback::Low);
        assert_eq!(evaluate_guess(66, 50), Feedback::High);
        assert_eq!(evaluate_guess(1, 100), Feedback::Low);
        assert_eq!(evaluate_guess(100, 1), Feedback::High);
    }

    #[test]
    fn test_classify_guess_tiers() {
        assert_eq!(classify_guess(50, 50), HistoryTier::Exact);
        assert_eq!(classify_guess(45, 50), HistoryTier::VeryClose);
        assert_eq!(classify_guess(65, 50), HistoryTier::Close);
        assert_eq!(classify_guess(66, 50), HistoryTier::Far);
    }

    #[test]
    fn test_new_engine_starts_playing() {
        let engine = GameEngine::new();
        assert!((MIN_NUMBER..=MAX_NUMBER).contains(&engine.target));
        assert_eq!(engine.status(), GameStatus::Playing);
        assert_eq!(engine.feedback(), None);
        assert!(engine.history().is_empty());
        assert_eq!(engine.attempts(), 0);
        assert_eq!(engine.revealed_target(), None);
    }

    #[test]
    fn test_with_target_rejects_out_of_range() {
        assert!(GameEngine::with_target(0).is_err());
        assert!(GameEngine::with_target(101).is_err());
        assert_eq!(engine_with(100).target, 100);
    }

    #[test]
    fn test_documented_sequence() {
        let mut engine = engine_with(50);

        let outcome = engine.submit_guess("55").unwrap();
        assert_eq!(outcome.feedback, Feedback::VeryClose);
        assert!(!outcome.won);

        assert_eq!(engine.submit_guess("45").unwrap().feedback, Feedback::VeryClose);
        assert_eq!(engine.submit_guess("30").unwrap().feedback, Feedback::Low);

        let outcome = engine.submit_guess("50").unwrap();
        assert_eq!(outcome.feedback, Feedback::Correct);
        assert!(outcome.won);
        assert_eq!(engine.attempts(), 4);
        assert_eq!(engine.history(), &[55, 45, 30, 50]);
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.revealed_target(), Some(50));
    }

    #[test]
    fn test_invalid_input_leaves_state_unchanged() {
        let mut engine = engine_with(20);
        engine.submit_guess("80").unwrap();

        assert_eq!(engine.submit_guess("abc"), Err(GuessError::InvalidInput));
        assert_eq!(engine.submit_guess("101"), Err(GuessError::InvalidInput));
        assert_eq!(engine.history(), &[80]);
        assert_eq!(engine.feedback(), Some(Feedback::High));
    }

    #[test]
    fn test_duplicate_guess_rejected() {
        let mut engine = engine_with(70);
        engine.submit_guess("10").unwrap();
        assert_eq!(engine.submit_guess("68").unwrap().feedback, Feedback::VeryClose);

        // re-evaluating 10 would turn the hint back to Low
        assert_eq!(engine.submit_guess("10"), Err(GuessError::DuplicateGuess(10)));
        assert_eq!(engine.submit_guess(" 10 "), Err(GuessError::DuplicateGuess(10)));
        assert_eq!(engine.feedback(), Some(Feedback::VeryClose));
        assert_eq!(engine.history(), &[10, 68]);
        assert_eq!(engine.attempts(), 2);
    }

    #[test]
    fn test_no_guesses_after_win() {
        let mut engine = engine_with(7);
        engine.submit_guess("7").unwrap();
        assert_eq!(engine.submit_guess("8"), Err(GuessError::RoundOver));
        assert_eq!(engine.attempts(), 1);
        assert_eq!(engine.status(), GameStatus::Won);
    }

    #[test]
    fn test_reset_starts_fresh_round() {
        let mut engine = engine_with(7);
        engine.submit_guess("3").unwrap();
        engine.submit_guess("7").unwrap();

        engine.reset();
        assert_eq!(engine.status(), GameStatus::Playing);
        assert_eq!(engine.feedback(), None);
        assert!(engine.history().is_empty());
        assert_eq!(engine.attempts(), 0);
        assert!((MIN_NUMBER..=MAX_NUMBER).contains(&engine.target));

        // previous guesses are allowed again
        assert!(engine.submit_guess("3").is_ok());
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = GameEngine::from_seed(42);
        let mut b = GameEngine::from_seed(42);
        assert_eq!(a.target, b.target);
        a.reset();
        b.reset();
        assert_eq!(a.target, b.target);
    }

    #[test]
    fn test_classify_history_entry_uses_target() {
        let mut engine = engine_with(30);
        for raw in ["35", "45", "46", "30"] {
            engine.submit_guess(raw).unwrap();
        }
        assert_eq!(engine.classify_history_entry(30), HistoryTier::Exact);
        assert_eq!(engine.classify_history_entry(35), HistoryTier::VeryClose);
        assert_eq!(engine.classify_history_entry(45), HistoryTier::Close);
        assert_eq!(engine.classify_history_entry(46), HistoryTier::Far);
    }
}
