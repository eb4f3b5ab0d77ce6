//! [`Game`] layers move history (undo, replay) on top of a bare
//! [`GameState`].

use crate::board::{id_to_str, str_to_id, CellId};
use crate::game_state::{GameState, GameStatus};
use rand::Rng;

/// A Reversi game plus the full record of moves played (`None` for a pass),
/// letting callers undo to any earlier point by replaying the record.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    record: Vec<Option<CellId>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            state: GameState::init(),
            record: Vec::new(),
        }
    }

    /// Discards all history and returns to the starting position.
    pub fn reset(&mut self) {
        self.state = GameState::init();
        self.record.clear();
    }

    /// The current position.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_game_finished(&self) -> bool {
        self.state.status.is_terminal()
    }

    pub fn record(&self) -> &[Option<CellId>] {
        &self.record
    }

    /// Apply a move (or `None` for a pass) and, on success, append it to
    /// the record. Returns `false` unchanged on an illegal move.
    pub fn put(&mut self, id: Option<CellId>) -> bool {
        if self.state.put(id) {
            self.record.push(self.state.last_move);
            true
        } else {
            false
        }
    }

    /// Apply a uniformly random legal move (or the forced pass), recording it.
    pub fn put_random<R: Rng>(&mut self, rng: &mut R) -> Option<CellId> {
        let mv = self.state.put_random(rng);
        self.record.push(self.state.last_move);
        mv
    }

    /// Undo the last `steps` recorded plies (default 2, a full round-trip
    /// of both players' moves) by truncating the record and replaying it
    /// from the starting position.
    pub fn regret(&mut self, steps: usize) {
        let new_len = self.record.len().saturating_sub(steps);
        self.record.truncate(new_len);

        self.state = GameState::init();
        let record = std::mem::take(&mut self.record);
        for &mv in &record {
            self.state.put(mv);
        }
        self.record = record;
    }

    pub fn str_to_id(s: &str) -> Option<CellId> {
        str_to_id(s)
    }

    pub fn id_to_str(id: Option<CellId>) -> String {
        id_to_str(id)
    }
}
