//! Concrete game scenarios exercised end to end through the public API,
//! kept in their own file rather than only inline `#[cfg(test)]` modules.

use reversi_mcts::board::{coord_to_id, Side};
use reversi_mcts::game::Game;
use reversi_mcts::game_state::{GameState, GameStatus};
use reversi_mcts::mcts::{Mcts, SearchConfig};
use reversi_mcts::Board;
use std::time::Duration;

#[test]
fn initial_opening_offers_the_four_classical_moves() {
    let state = GameState::init();
    assert_eq!(state.side_to_move(), Side::Black);
    let mut moves = state.legal_moves.clone();
    moves.sort_unstable();
    assert_eq!(
        moves,
        vec![
            coord_to_id(2, 3), // D3
            coord_to_id(3, 2), // C4
            coord_to_id(4, 5), // F5
            coord_to_id(5, 4), // E6
        ]
    );
}

#[test]
fn forced_corner_dominates_the_priority_bucket() {
    let mut board = Board::new();
    board.set(coord_to_id(0, 1), Side::White, false);
    board.set(coord_to_id(0, 2), Side::Black, false);
    let mut state = GameState {
        board,
        turn: 1,
        last_move: None,
        last_black_count: 0,
        last_white_count: 0,
        status: GameStatus::Normal,
        legal_moves: Vec::new(),
    };
    state.recompute_legal_moves();
    assert_eq!(state.legal_moves, vec![coord_to_id(0, 0)]);

    let mut mcts = Mcts::new(SearchConfig {
        search_time: Duration::from_millis(20),
        thread_num: Some(1),
        ..SearchConfig::default()
    });
    let report = mcts.search(&state);
    assert_eq!(report.best_move, Some(coord_to_id(0, 0)));
}

/// A position where the side to move (White, at the corner trap above, one
/// ply later) has no legal response at all, while Black retains a move
/// elsewhere — exercising the forced-pass transition without the game
/// ending.
#[test]
fn pass_required_when_stuck_but_game_continues() {
    let mut board = Board::new();
    // Black's only move: capture the lone White disc at (0,1).
    board.set(coord_to_id(0, 1), Side::White, false);
    board.set(coord_to_id(0, 2), Side::Black, false);
    // A second, independent capturing line reserved for Black's *next* turn,
    // far enough away that Black's first move cannot disturb it.
    board.set(coord_to_id(7, 6), Side::White, false);
    board.set(coord_to_id(7, 7), Side::Black, false);

    let mut state = GameState {
        board,
        turn: 1,
        last_move: None,
        last_black_count: 0,
        last_white_count: 0,
        status: GameStatus::Normal,
        legal_moves: Vec::new(),
    };
    state.recompute_legal_moves();
    assert_eq!(state.legal_moves, vec![coord_to_id(0, 0)]);

    assert!(state.put(Some(coord_to_id(0, 0))));
    assert_eq!(state.turn, 2);
    assert_eq!(state.status, GameStatus::Pass);
    assert!(state.legal_moves.is_empty());
    assert_eq!(state.board.white_count, 1);
    assert_eq!(state.board.black_count, 4);

    // White is forced to pass.
    assert!(state.put(None));
    assert_eq!(state.turn, 3);
    assert_eq!(state.side_to_move(), Side::Black);
    assert_eq!(state.status, GameStatus::Normal);
    assert!(state.legal_moves.contains(&coord_to_id(7, 5)));
}

#[test]
fn terminal_by_full_board_without_a_wipeout() {
    let mut board = Board::new();
    let capture_target = coord_to_id(0, 0);
    let flanked = coord_to_id(0, 1);
    let anchor = coord_to_id(0, 2);
    board.set(flanked, Side::White, false);
    board.set(anchor, Side::Black, false);

    for id in 0..64 {
        if id == capture_target || id == flanked || id == anchor {
            continue;
        }
        let side = if id % 2 == 0 { Side::Black } else { Side::White };
        board.set(id, side, false);
    }

    let mut state = GameState {
        board,
        turn: 1,
        last_move: None,
        last_black_count: 0,
        last_white_count: 0,
        status: GameStatus::Normal,
        legal_moves: Vec::new(),
    };
    state.recompute_legal_moves();
    assert_eq!(state.legal_moves, vec![capture_target]);

    assert!(state.put(Some(capture_target)));
    let black = state.board.black_count;
    let white = state.board.white_count;
    assert_eq!(black + white, 64, "the move must have filled the last cell");
    assert!(state.status.is_terminal());
    let expected = if black > white {
        GameStatus::BlackWin
    } else if white > black {
        GameStatus::WhiteWin
    } else {
        GameStatus::Draw
    };
    assert_eq!(state.status, expected);
}

#[test]
fn undo_then_replay_reaches_the_identical_position() {
    let mut game = Game::new();
    let m1 = coord_to_id(2, 3); // D3, a classic legal opening move
    assert!(game.put(Some(m1)));
    let m2 = game.state().legal_moves[0];
    assert!(game.put(Some(m2)));
    let m3 = game.state().legal_moves[0];
    assert!(game.put(Some(m3)));

    let expected_turn = game.turn();
    let expected_status = game.status();
    let expected_black = game.state().board.black_count;
    let expected_white = game.state().board.white_count;
    let expected_cells: Vec<_> = (0..64).map(|id| game.state().board.get(id)).collect();

    game.regret(2);
    assert_eq!(game.record(), &[Some(m1)]);
    assert!(game.put(Some(m2)));
    assert!(game.put(Some(m3)));

    assert_eq!(game.turn(), expected_turn);
    assert_eq!(game.status(), expected_status);
    assert_eq!(game.state().board.black_count, expected_black);
    assert_eq!(game.state().board.white_count, expected_white);
    for id in 0..64 {
        assert_eq!(game.state().board.get(id), expected_cells[id]);
    }
}

#[test]
fn coordinate_round_trip_through_the_game_api() {
    for row in 0..8 {
        for col in 0..8 {
            let id = coord_to_id(row, col);
            let s = Game::id_to_str(Some(id));
            assert_eq!(Game::str_to_id(&s), Some(id));
        }
    }
    assert_eq!(Game::id_to_str(None), "pass");
}

#[test]
fn random_playout_always_terminates() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::new();
    let mut plies = 0;
    while !game.is_game_finished() {
        game.put_random(&mut rng);
        plies += 1;
        assert!(plies <= 120, "a Reversi game cannot run this long");
    }
    assert!(matches!(
        game.status(),
        GameStatus::BlackWin | GameStatus::WhiteWin | GameStatus::Draw
    ));
    let board = &game.state().board;
    assert!(board.black_count + board.white_count <= 64);
}
