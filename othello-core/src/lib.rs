//! Othello Core - Game engine and AI
//!
//! This crate provides the core game logic for two-player Othello:
//! - Board geometry (8x8 grid, opaque color tokens bound to two slots)
//! - Legality and flip-capture rules
//! - Game state machine with passes, game over and undo
//! - Phase-aware position evaluation
//! - Five-tier computer opponent up to alpha-beta minimax

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod eval;
pub mod game;
pub mod history;
pub mod rules;

// Re-exports for convenient access
pub use ai::{AiPlayer, Difficulty, SearchResult};
pub use board::{Board, Pos, Side, BOARD_SIZE, CORNERS, DIRECTIONS};
pub use config::SessionConfig;
pub use error::EngineError;
pub use eval::{evaluate_board, Heuristics, Phase, WIN_VALUE};
pub use game::{
    Color, Controller, GameResult, GameState, GameStatus, MoveReport, PassReport, PlayerSlot,
    Players, Score, TurnChange, UndoReport,
};
pub use history::{HistoryEntry, HistoryStack};
pub use rules::Move;
