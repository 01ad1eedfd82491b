use number_guess::cli::{CliInterface, parse_cli};
use number_guess::logging::init_logging;
use number_guess::tui::TuiInterface;
use number_guess::{GameEngine, game_loop};
use std::io;

fn main() {
    let cli = parse_cli();
    init_logging();

    let mut engine = GameEngine::new();

    if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut engine, &mut interface);
        return;
    }

    match TuiInterface::new() {
        Ok(mut interface) => game_loop(&mut engine, &mut interface),
        Err(e) => {
            eprintln!("Failed to start the terminal interface: {e}");
            eprintln!("Run with --plain to play with line prompts instead.");
            std::process::exit(1);
        }
    }
}
