use crate::debug_log;
use crate::display::{SUBTITLE, TITLE, round_feedback, tier_label, tiered_history};
use crate::engine::{GameEngine, GuessError};
use crate::game_state::{GameInterface, UserAction};
use clap::Parser;
use std::io::BufRead;

/// Guess the Number: find the hidden number between 1 and 100
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play with plain line prompts instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn parse_action(input: &str, round_won: bool) -> Option<UserAction> {
    match input.to_lowercase().as_str() {
        "exit" | "quit" => Some(UserAction::Exit),
        "new" | "next" if round_won => Some(UserAction::NewGame),
        "new" | "next" => {
            println!("Find the number first, then start a new game.");
            None
        }
        _ => Some(UserAction::Guess(input.to_string())),
    }
}

pub fn read_action<R: BufRead>(reader: &mut R, round_won: bool) -> Option<UserAction> {
    if round_won {
        println!("\nType 'new' to play again, or 'exit' to quit:");
    } else {
        println!("\nEnter your guess (1-100, or 'exit' to quit):");
    }

    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => {
            debug_log!("read_action() - end of input");
            Some(UserAction::Exit)
        }
        Ok(_) => parse_action(input.trim(), round_won),
        Err(e) => {
            debug_log!("read_action() - read failed: {}", e);
            Some(UserAction::Exit)
        }
    }
}

pub fn display_welcome() {
    println!("{TITLE}");
    println!("{SUBTITLE}");
}

pub fn display_round(engine: &GameEngine) {
    if let Some(view) = round_feedback(engine) {
        println!("{} {}", view.icon, view.text);
    }

    let history = tiered_history(engine);
    if !history.is_empty() {
        let entries: Vec<String> = history
            .iter()
            .map(|&(value, tier)| format!("{value} ({})", tier_label(tier)))
            .collect();
        println!("Previous Guesses: {}", entries.join(", "));
    }
}

pub fn display_rejection(error: &GuessError) {
    println!("{}: {error}", error.title());
}

pub fn display_new_game_message() {
    println!("New game started. {SUBTITLE}.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for line-based play
pub struct CliInterface<R: BufRead> {
    reader: R,
    welcomed: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            welcomed: false,
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round(&mut self, engine: &GameEngine) {
        if !self.welcomed {
            display_welcome();
            self.welcomed = true;
        }
        display_round(engine);
    }

    fn read_action(&mut self, engine: &GameEngine) -> Option<UserAction> {
        read_action(&mut self.reader, engine.status().is_won())
    }

    fn display_rejection(&mut self, error: &GuessError) {
        display_rejection(error);
    }

    fn display_new_game(&mut self, _engine: &GameEngine) {
        display_new_game_message();
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
