use reversi_mcts::cli;
use std::io::{self, Write};

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(err) = cli::run(&mut input, &mut output) {
        let _ = writeln!(io::stderr(), "I/O error: {}", err);
        std::process::exit(1);
    }
}
