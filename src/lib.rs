// Library interface for number-guess
// This allows integration tests to access internal modules

pub mod cli;
pub mod display;
pub mod engine;
pub mod game_state;
pub mod logging;
pub mod tui;

// Re-export commonly used items for easier testing
pub use display::{FeedbackView, feedback_view, round_feedback, tier_color, tiered_history};
pub use engine::{
    CLOSE_RANGE, Feedback, GameEngine, GameStatus, GuessError, GuessOutcome, HistoryTier,
    MAX_NUMBER, MIN_NUMBER, VERY_CLOSE_RANGE, classify_guess, evaluate_guess, parse_guess,
};
pub use game_state::{GameInterface, UserAction, game_loop};
