//! # Reversi MCTS Engine
//!
//! This library implements a Reversi (Othello) engine built around a
//! parallel Monte Carlo Tree Search move selector operating over a compact
//! 8x8 board representation with an incremental legal-move generator and
//! heuristic move-priority classification.
//!
//! It provides modules for:
//! - Board representation and capture resolution (`board`)
//! - Corner/X-square move-priority classification (`priority`)
//! - Turn-by-turn game rules and terminal detection (`game_state`)
//! - History-tracking wrapper used by callers (`game`)
//! - A recycling arena for search-tree nodes (`node_pool`)
//! - The MCTS controller itself (`mcts`)
//! - A thin interactive driver (`cli`)

pub mod board;
pub mod cli;
pub mod game;
pub mod game_state;
pub mod mcts;
pub mod node_pool;
pub mod priority;

pub use board::{Board, Cell, Side};
pub use game::Game;
pub use game_state::{GameState, GameStatus};
pub use mcts::{Mcts, SearchConfig, SearchReport};
