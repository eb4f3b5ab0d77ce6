//! Thin interactive driver: print the board, read a line, dispatch to
//! [`Game`]. No game rules live here; the CLI is only an I/O-and-dispatch
//! collaborator of the engine, never a rules authority of its own.

use crate::game::Game;
use crate::game_state::GameStatus;
use crate::mcts::{Mcts, SearchConfig};
use log::info;
use std::io::{self, BufRead, Write};

/// Runs an interactive game to completion against the engine, reading
/// moves for the side to move from `input` and writing the board and
/// prompts to `output`.
pub fn run<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    let mut game = Game::new();
    let mut mcts = Mcts::new(SearchConfig::default());

    loop {
        print_game(&game, output)?;

        if game.is_game_finished() {
            break;
        }

        if game.status() == GameStatus::Pass {
            writeln!(output, "No legal moves; passing automatically.")?;
            game.put(None);
            continue;
        }

        let report = mcts.search(game.state());
        info!("engine suggests {}", Game::id_to_str(report.best_move));

        loop {
            write!(output, "Enter your move: ")?;
            output.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let line = line.trim();

            if line == "undo" && game.turn() > 2 {
                game.regret(2);
                print_game(&game, output)?;
                continue;
            }

            if line == "pass" && game.status() == GameStatus::Pass {
                game.put(None);
                break;
            }

            if let Some(id) = Game::str_to_id(line) {
                if game.put(Some(id)) {
                    break;
                }
            }

            writeln!(output, "Invalid move.")?;
        }
    }

    Ok(())
}

fn print_game<W: Write>(game: &Game, output: &mut W) -> io::Result<()> {
    let state = game.state();
    writeln!(
        output,
        "\n==== Turn {:02}, {:?} to move ====",
        game.turn(),
        state.side_to_move()
    )?;
    writeln!(output, "==== State: {:?} ====", game.status())?;
    writeln!(
        output,
        "==== Black: {:02} | White: {:02} ====\n",
        state.board.black_count, state.board.white_count
    )?;
    write!(output, "{}", state.board.render(state.last_move))?;
    Ok(())
}
