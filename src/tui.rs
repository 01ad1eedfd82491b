//! TUI (Terminal User Interface) module for Guess the Number
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI mirrors the round:
//! - `EnteringGuess` while the number is still hidden
//! - `RoundWon` once it is found; only a new game (or quitting) leaves it

use crate::display::{FeedbackView, SUBTITLE, TITLE, round_feedback, tier_color, tiered_history};
use crate::engine::{GameEngine, GuessError, HistoryTier};
use crate::game_state::{GameInterface, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const MAX_INPUT_DIGITS: usize = 3;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const INPUT_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    RoundWon,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: TuiState,
    current_input: &'a str,
    feedback: Option<&'a FeedbackView>,
    history: &'a [(u8, HistoryTier)],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Result of one key press while typing a guess.
#[derive(Debug, PartialEq, Eq)]
enum GuessKey {
    Edited,
    Rejected(String),
    Action(UserAction),
    Ignored,
}

/// Apply a key to the pending guess text. Enter hands the text over and
/// empties the box whether or not the engine will accept it.
fn apply_guess_key(current_input: &mut String, key: KeyEvent) -> GuessKey {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            GuessKey::Action(UserAction::Exit)
        }
        KeyCode::Char(_) if TuiInterface::has_modifier_keys(&key) => {
            debug_log!(
                "apply_guess_key() - Ignoring character with modifier: {:?}",
                key.modifiers
            );
            GuessKey::Ignored
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if current_input.len() < MAX_INPUT_DIGITS {
                current_input.push(c);
                GuessKey::Edited
            } else {
                GuessKey::Rejected(format!("At most {MAX_INPUT_DIGITS} digits!"))
            }
        }
        KeyCode::Char(c) => {
            GuessKey::Rejected(format!("Only digits are allowed! ('{c}' is not a digit)"))
        }
        KeyCode::Backspace => {
            current_input.pop();
            GuessKey::Edited
        }
        KeyCode::Enter => GuessKey::Action(UserAction::Guess(std::mem::take(current_input))),
        KeyCode::Esc => GuessKey::Action(UserAction::Exit),
        _ => GuessKey::Ignored,
    }
}

/// Main TUI interface component.
///
/// Keeps a snapshot of the last rendered round, the pending input text and
/// the notices shown under the board.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    current_input: String,
    feedback: Option<FeedbackView>,
    history: Vec<(u8, HistoryTier)>,
    message: String,
    error_message: String,
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
            state: TuiState::EnteringGuess,
            current_input: String::new(),
            feedback: None,
            history: Vec::new(),
            message: String::new(),
            error_message: String::new(),
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
            state: self.state,
            current_input: &self.current_input,
            feedback: self.feedback.as_ref(),
            history: &self.history,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Title + subtitle
                Constraint::Length(3), // Input
                Constraint::Min(5),    // Feedback and notices
                Constraint::Length(4), // History
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_input(f, chunks[1], ctx.current_input, ctx.state);
        Self::render_feedback(f, chunks[2], ctx.feedback, ctx.message, ctx.error_message);
        Self::render_history(f, chunks[3], ctx.history);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(format!("◎ {TITLE}"), HEADER_STYLE)),
            Line::from(SUBTITLE),
        ];
        let title = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, state: TuiState) {
        let line = match state {
            TuiState::EnteringGuess if current_input.is_empty() => Line::from(Span::styled(
                " Your guess... ",
                Style::default().fg(Color::Gray).bg(Color::DarkGray),
            )),
            TuiState::EnteringGuess => Line::from(Span::styled(
                format!(" {current_input} "),
                INPUT_STYLE,
            )),
            TuiState::RoundWon => Line::from(Span::styled(
                "Round over",
                Style::default().fg(Color::DarkGray),
            )),
        };
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_feedback(
        f: &mut Frame,
        area: Rect,
        feedback: Option<&FeedbackView>,
        message: &str,
        error_message: &str,
    ) {
        let mut lines = Vec::new();

        if let Some(view) = feedback {
            let mut style = Style::default().fg(view.color);
            if view.emphasized {
                style = style.add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(vec![
                Span::styled(view.icon, style),
                Span::raw(" "),
                Span::styled(view.text.as_str(), style),
            ]));
            lines.push(Line::from(""));
        }

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        if !error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Hint").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_history(f: &mut Frame, area: Rect, history: &[(u8, HistoryTier)]) {
        let mut spans = Vec::with_capacity(history.len() * 2);
        for &(value, tier) in history {
            spans.push(Span::styled(
                format!(" {value} "),
                Style::default().fg(Color::Black).bg(tier_color(tier)),
            ));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Previous Guesses").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "Type a number | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
            TuiState::RoundWon => "N / ENTER: Play Again | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    return Ok(None);
                }
                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                Ok(match self.state {
                    TuiState::EnteringGuess => self.handle_guess_input(key),
                    TuiState::RoundWon => Self::handle_won_input(key),
                })
            }
            // mouse, focus, paste and resize events
            _ => Ok(None),
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match apply_guess_key(&mut self.current_input, key) {
            GuessKey::Action(action) => {
                info_log!("handle_guess_input() - Action from key: {:?}", action);
                return Some(action);
            }
            GuessKey::Rejected(message) => self.error_message = message,
            GuessKey::Edited | GuessKey::Ignored => {}
        }
        None
    }

    fn handle_won_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UserAction::Exit)
            }
            KeyCode::Char('n' | 'N') | KeyCode::Enter => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn sync_round(&mut self, engine: &GameEngine) {
        self.feedback = round_feedback(engine);
        self.history = tiered_history(engine);
        self.state = if engine.status().is_won() {
            TuiState::RoundWon
        } else {
            TuiState::EnteringGuess
        };
    }
}

impl GameInterface for TuiInterface {
    fn display_round(&mut self, engine: &GameEngine) {
        self.sync_round(engine);
        self.error_message.clear();
        self.message.clear();
        self.status = match self.state {
            TuiState::RoundWon => "You found it!".to_string(),
            TuiState::EnteringGuess => format!("Attempts: {}", engine.attempts()),
        };
        self.draw_or_log();
    }

    fn read_action(&mut self, _engine: &GameEngine) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_rejection(&mut self, error: &GuessError) {
        self.error_message = format!("{}: {error}", error.title());
        self.draw_or_log();
    }

    fn display_new_game(&mut self, engine: &GameEngine) {
        self.sync_round(engine);
        self.current_input.clear();
        self.error_message.clear();
        self.message = format!("New game started. {SUBTITLE}.");
        self.status = "Attempts: 0".to_string();
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
