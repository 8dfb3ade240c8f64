//! Match play - multiple games between two AI configurations
//!
//! Level 2 - Phase-level implementation

use othello_core::{EngineError, Side};
use rayon::prelude::*;

use crate::config::{AiConfig, MatchConfig};
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of a match (multiple games), from `a`'s point of view
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// Wins for the first participant
    pub a_wins: u32,
    /// Wins for the second participant
    pub b_wins: u32,
    /// Games ending with equal disc counts
    pub draws: u32,
    /// Average final disc difference for `a`
    pub avg_margin: f32,
    /// Total games played
    pub games_played: u32,
    /// Individual game outcomes
    pub game_outcomes: Vec<GameOutcome>,
}

impl MatchResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self {
            a_wins: 0,
            b_wins: 0,
            draws: 0,
            avg_margin: 0.0,
            games_played: 0,
            game_outcomes: Vec::new(),
        }
    }

    /// Combine two results
    pub fn combine(&self, other: &MatchResult) -> MatchResult {
        let total_games = self.games_played + other.games_played;
        let avg_margin = if total_games > 0 {
            (self.avg_margin * self.games_played as f32
                + other.avg_margin * other.games_played as f32)
                / total_games as f32
        } else {
            0.0
        };

        let mut game_outcomes = self.game_outcomes.clone();
        game_outcomes.extend(other.game_outcomes.iter().cloned());

        MatchResult {
            a_wins: self.a_wins + other.a_wins,
            b_wins: self.b_wins + other.b_wins,
            draws: self.draws + other.draws,
            avg_margin,
            games_played: total_games,
            game_outcomes,
        }
    }

    /// Same games seen from `b`'s side
    pub fn flipped(&self) -> MatchResult {
        MatchResult {
            a_wins: self.b_wins,
            b_wins: self.a_wins,
            draws: self.draws,
            avg_margin: -self.avg_margin,
            games_played: self.games_played,
            game_outcomes: self.game_outcomes.clone(),
        }
    }

    pub fn a_win_rate(&self) -> f32 {
        self.rate(self.a_wins)
    }

    pub fn b_win_rate(&self) -> f32 {
        self.rate(self.b_wins)
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(self.draws)
    }

    /// Wins = 1.0, Draws = 0.5, Losses = 0.0
    pub fn score_for_a(&self) -> f32 {
        self.a_wins as f32 + 0.5 * self.draws as f32
    }

    pub fn score_for_b(&self) -> f32 {
        self.b_wins as f32 + 0.5 * self.draws as f32
    }

    fn rate(&self, count: u32) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            count as f32 / self.games_played as f32
        }
    }
}

/// Play a match between two configurations (Level 2 phase)
///
/// Plays multiple games alternating the opening move for fairness.
pub fn play_match(
    a: &AiConfig,
    b: &AiConfig,
    config: &MatchConfig,
) -> Result<MatchResult, EngineError> {
    if config.games_per_match == 0 {
        return Ok(MatchResult::empty());
    }

    let game_configs = prepare_game_configs(config);
    let outcomes = execute_games(a, b, &game_configs)?;
    let result = aggregate_results(outcomes);
    log_match(a, b, &result);
    Ok(result)
}

/// Play a match with parallel execution (Level 2 phase)
pub fn play_match_parallel(
    a: &AiConfig,
    b: &AiConfig,
    config: &MatchConfig,
) -> Result<MatchResult, EngineError> {
    if config.games_per_match == 0 {
        return Ok(MatchResult::empty());
    }

    let game_configs = prepare_game_configs(config);
    let outcomes = execute_games_parallel(a, b, &game_configs)?;
    let result = aggregate_results(outcomes);
    log_match(a, b, &result);
    Ok(result)
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Configuration for a single game in a match
#[derive(Clone, Copy)]
struct GameConfig {
    /// Which slot makes the opening move
    first_mover: Side,
    /// Seed for both players of this game
    seed: u64,
}

/// Prepare game configurations for a match
fn prepare_game_configs(config: &MatchConfig) -> Vec<GameConfig> {
    (0..config.games_per_match)
        .map(|i| GameConfig {
            first_mover: if i % 2 == 0 { Side::A } else { Side::B },
            seed: config.seed.wrapping_add(i as u64),
        })
        .collect()
}

/// Execute games sequentially
fn execute_games(
    a: &AiConfig,
    b: &AiConfig,
    game_configs: &[GameConfig],
) -> Result<Vec<GameOutcome>, EngineError> {
    game_configs
        .iter()
        .map(|gc| play_single_game(a, b, gc))
        .collect()
}

/// Execute games in parallel using rayon
fn execute_games_parallel(
    a: &AiConfig,
    b: &AiConfig,
    game_configs: &[GameConfig],
) -> Result<Vec<GameOutcome>, EngineError> {
    game_configs
        .par_iter()
        .map(|gc| play_single_game(a, b, gc))
        .collect()
}

/// Play a single game with the given configuration
fn play_single_game(
    a: &AiConfig,
    b: &AiConfig,
    gc: &GameConfig,
) -> Result<GameOutcome, EngineError> {
    let mut runner = GameRunner::new(gc.seed);
    runner.play_game(a, b, gc.first_mover)
}

/// Aggregate game outcomes into a match result
fn aggregate_results(outcomes: Vec<GameOutcome>) -> MatchResult {
    let mut a_wins = 0u32;
    let mut b_wins = 0u32;
    let mut draws = 0u32;
    let mut total_margin = 0i64;

    // `a` always sits in slot A, so slot wins are participant wins
    for outcome in &outcomes {
        total_margin += outcome.margin() as i64;
        match outcome.winner() {
            Some(Side::A) => a_wins += 1,
            Some(Side::B) => b_wins += 1,
            None => draws += 1,
        }
    }

    let games_played = outcomes.len() as u32;
    let avg_margin = if games_played > 0 {
        total_margin as f32 / games_played as f32
    } else {
        0.0
    };

    MatchResult {
        a_wins,
        b_wins,
        draws,
        avg_margin,
        games_played,
        game_outcomes: outcomes,
    }
}

fn log_match(a: &AiConfig, b: &AiConfig, result: &MatchResult) {
    tracing::info!(
        "{:?} vs {:?}: +{} -{} ={} (avg margin {:.1})",
        a.difficulty,
        b.difficulty,
        result.a_wins,
        result.b_wins,
        result.draws,
        result.avg_margin
    );
}
