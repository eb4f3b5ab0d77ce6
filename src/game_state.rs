//! Per-ply game rules: legal-move generation, move application, and
//! terminal-state detection, layered on top of [`Board`].

use crate::board::{coord_to_id, CellId, Board, Side};
use crate::priority::PRIORITIES_HIGH_TO_LOW;
use rand::Rng;

/// Turn index past which the engine would start considering a secondary,
/// late-game priority bucket. That mechanism is deliberately left
/// deferred — the constant is kept only because it documents where the
/// cutoff would live.
const LATE_GAME_TURN: u32 = 32;

/// Outcome of the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Normal,
    Pass,
    BlackWin,
    WhiteWin,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::BlackWin | GameStatus::WhiteWin | GameStatus::Draw
        )
    }
}

/// A Reversi position: the board, whose turn it is (derived from `turn`),
/// the cached list of legal moves for the side to move, and enough history
/// (`last_move`, `last_*_count`) to support fast-stop rollout tiebreaks.
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub turn: u32,
    pub last_move: Option<CellId>,
    pub last_black_count: u32,
    pub last_white_count: u32,
    pub status: GameStatus,
    pub legal_moves: Vec<CellId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::init()
    }
}

impl GameState {
    /// The starting position: the center four discs, Black to move, with
    /// `legal_moves` already populated.
    pub fn init() -> Self {
        let mut board = Board::new();
        board.set(coord_to_id(3, 3), Side::White, true);
        board.set(coord_to_id(4, 3), Side::Black, true);
        board.set(coord_to_id(3, 4), Side::Black, true);
        board.set(coord_to_id(4, 4), Side::White, true);

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
        state
    }

    /// `Black` on odd turns, `White` on even turns.
    pub fn side_to_move(&self) -> Side {
        if self.turn % 2 == 1 {
            Side::Black
        } else {
            Side::White
        }
    }

    /// Apply a move (or `None` for a recorded pass) for the side to move.
    /// Returns `false` (and leaves state unchanged) on an illegal move or
    /// an out-of-turn pass.
    pub fn put(&mut self, id: Option<CellId>) -> bool {
        self.last_black_count = self.board.black_count;
        self.last_white_count = self.board.white_count;

        match self.status {
            GameStatus::Normal => {
                let id = match id {
                    Some(id) => id,
                    None => return false,
                };
                if self.board.get(id) != crate::board::Cell::Empty {
                    return false;
                }
                if self.board.legality_at(id) != crate::board::Legality::Valid {
                    return false;
                }
                let side = self.side_to_move();
                self.board.set(id, side, true);
                self.last_move = Some(id);
            }
            GameStatus::Pass => {
                if id.is_some() {
                    return false;
                }
                self.last_move = None;
            }
            _ => return false,
        }

        self.turn += 1;
        self.recompute_legal_moves();

        let board = &self.board;
        let is_finished = board.black_count == 0
            || board.white_count == 0
            || board.black_count + board.white_count == crate::board::GRID_NUM as u32
            || (self.status == GameStatus::Pass && self.legal_moves.is_empty());

        if is_finished {
            self.status = if board.black_count == board.white_count {
                GameStatus::Draw
            } else if board.black_count > board.white_count {
                GameStatus::BlackWin
            } else {
                GameStatus::WhiteWin
            };
        } else if self.status == GameStatus::Normal && self.legal_moves.is_empty() {
            self.status = GameStatus::Pass;
        } else if self.status == GameStatus::Pass && !self.legal_moves.is_empty() {
            self.status = GameStatus::Normal;
        }

        true
    }

    /// Apply a uniformly random legal move (or the forced pass). Returns
    /// the id played, or `None` for a pass.
    pub fn put_random<R: Rng>(&mut self, rng: &mut R) -> Option<CellId> {
        if self.status == GameStatus::Pass {
            self.put(None);
            return None;
        }
        let idx = rng.gen_range(0..self.legal_moves.len());
        let last = self.legal_moves.len() - 1;
        self.legal_moves.swap(idx, last);
        let mv = self.legal_moves.pop().expect("legal_moves non-empty");
        self.put(Some(mv));
        Some(mv)
    }

    /// Recompute `legal_moves` from the board: classify for the side to
    /// move, then take the single highest-priority non-empty bucket
    /// (`High -> Middle -> Low`).
    pub fn recompute_legal_moves(&mut self) {
        let side = self.side_to_move();
        self.board.classify(side);

        let chosen = PRIORITIES_HIGH_TO_LOW
            .iter()
            .find(|&&p| self.board.has_priority(p));

        self.legal_moves = match chosen {
            Some(&priority) => self.board.valid_moves_by_priority(priority),
            None => Vec::new(),
        };

        let _ = LATE_GAME_TURN; // see UpdateValidGridsExtra note above
    }
}
