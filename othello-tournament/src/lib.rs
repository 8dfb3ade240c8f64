//! Othello Tournament - Strength comparison through AI-vs-AI play
//!
//! This crate provides tournament infrastructure:
//! - Single games between two computer opponents
//! - Color-alternating matches, sequential or on a rayon pool
//! - Round-robin ladders between difficulty tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: play_match (phases)
//! - Level 3: play_game (steps)
//! - Level 4: utilities, configuration

mod config;
mod game_runner;
mod match_play;
mod tournament;

pub use config::{AiConfig, MatchConfig, TournamentConfig};
pub use game_runner::{GameOutcome, GameRunner, FIRST_COLOR, SECOND_COLOR};
pub use match_play::{play_match, play_match_parallel, MatchResult};
pub use tournament::{run_tournament, Standing, TournamentResult};
