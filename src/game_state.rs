use crate::engine::{GameEngine, GuessError};
use crate::{debug_log, info_log};

/// What the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

/// Presentation side of the game.
///
/// Implementations render the engine and turn raw input into `UserAction`s.
/// They only read the engine; every mutation goes through `game_loop`.
pub trait GameInterface {
    /// Show the current feedback and guess history.
    fn display_round(&mut self, engine: &GameEngine);

    /// Block until the player does something. `None` means the input was not
    /// actionable and the loop should ask again.
    fn read_action(&mut self, engine: &GameEngine) -> Option<UserAction>;

    fn display_rejection(&mut self, error: &GuessError);

    fn display_new_game(&mut self, engine: &GameEngine);

    fn display_exit_message(&mut self);
}

pub fn game_loop<I: GameInterface>(engine: &mut GameEngine, interface: &mut I) {
    interface.display_round(engine);

    loop {
        let Some(action) = interface.read_action(engine) else {
            continue;
        };

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame if engine.status().is_won() => {
                engine.reset();
                info_log!("game_loop() - new round started");
                interface.display_new_game(engine);
            }
            UserAction::NewGame => {
                debug_log!("game_loop() - new game ignored while the round is in progress");
            }
            UserAction::Guess(raw) => match engine.submit_guess(&raw) {
                Ok(outcome) => {
                    if outcome.won {
                        info_log!("game_loop() - round won in {} attempts", engine.attempts());
                    }
                    interface.display_round(engine);
                }
                Err(e) => {
                    debug_log!("game_loop() - rejected {:?}: {}", raw, e);
                    interface.display_rejection(&e);
                }
            },
        }
    }
}
