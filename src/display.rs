//! Pure mapping from game state to what the player sees.
//!
//! Nothing here touches the terminal, so both interfaces share it and it can
//! be tested without a rendering environment.

use crate::engine::{Feedback, GameEngine, HistoryTier};
use ratatui::style::Color;

pub const TITLE: &str = "Guess the Number";
pub const SUBTITLE: &str = "Enter a number between 1 and 100";

const MUTED: Color = Color::Gray;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackView {
    pub icon: &'static str,
    pub text: String,
    pub color: Color,
    /// Only the winning message is drawn bold.
    pub emphasized: bool,
}

pub fn feedback_view(feedback: Feedback, target: u8, attempts: usize) -> FeedbackView {
    let (icon, text) = match feedback {
        Feedback::Correct => (
            "✓",
            format!("Correct! It was {target}. You guessed it in {attempts} tries."),
        ),
        Feedback::VeryClose => ("🔥", "Very close! You are nearly there.".to_string()),
        Feedback::Close => ("💡", "You are getting warm...".to_string()),
        Feedback::Low => ("↓", "Too low. Try again.".to_string()),
        Feedback::High => ("↑", "Too high. Try again.".to_string()),
    };

    let correct = feedback.is_correct();
    FeedbackView {
        icon,
        text,
        color: if correct { Color::Green } else { MUTED },
        emphasized: correct,
    }
}

/// Feedback for the engine's latest guess, `None` before the first one.
pub fn round_feedback(engine: &GameEngine) -> Option<FeedbackView> {
    let feedback = engine.feedback()?;
    // The target only matters for the winning text, where it is revealed.
    let target = engine.revealed_target().unwrap_or_default();
    Some(feedback_view(feedback, target, engine.attempts()))
}

pub const fn tier_color(tier: HistoryTier) -> Color {
    match tier {
        HistoryTier::Exact => Color::Green,
        HistoryTier::VeryClose => Color::Yellow,
        HistoryTier::Close => Color::Cyan,
        HistoryTier::Far => Color::DarkGray,
    }
}

pub const fn tier_label(tier: HistoryTier) -> &'static str {
    match tier {
        HistoryTier::Exact => "exact",
        HistoryTier::VeryClose => "hot",
        HistoryTier::Close => "warm",
        HistoryTier::Far => "cold",
    }
}

/// Past guesses paired with their display tier, oldest first.
pub fn tiered_history(engine: &GameEngine) -> Vec<(u8, HistoryTier)> {
    engine
        .history()
        .iter()
        .map(|&value| (value, engine.classify_history_entry(value)))
        .collect()
}
