//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use othello_core::{AiPlayer, Difficulty, Heuristics};

/// Base seed when a config does not pin one
const DEFAULT_SEED: u64 = 42;

/// One computer participant
#[derive(Clone, Debug, PartialEq)]
pub struct AiConfig {
    /// Strategy tier
    pub difficulty: Difficulty,
    /// Evaluation weights for the tiers that use them
    pub heuristics: Heuristics,
    /// Random seed for reproducibility (None = 42)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Greedy,
            heuristics: Heuristics::default(),
            seed: None,
        }
    }
}

impl AiConfig {
    /// Create config for the given tier
    pub fn level(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Set custom heuristics
    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a player for one game, offsetting the base seed by `game_seed`
    pub(crate) fn player(&self, game_seed: u64) -> AiPlayer {
        let seed = self.seed.unwrap_or(DEFAULT_SEED).wrapping_add(game_seed);
        AiPlayer::with_seed(self.difficulty, seed).with_heuristics(self.heuristics.clone())
    }
}

/// How many games two participants play against each other
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Number of games (should be even for first-mover alternation)
    pub games_per_match: usize,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// First game seed; game `i` uses `seed + i`
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games_per_match: 10,
            parallel: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl MatchConfig {
    /// Create match config with the given number of games
    pub fn new(games_per_match: usize) -> Self {
        Self {
            games_per_match,
            ..Default::default()
        }
    }

    /// Run games one after another
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Settings used for every pairing
    pub match_config: MatchConfig,
    /// Whether to run pairings in parallel
    pub parallel: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            parallel: true,
        }
    }
}

impl TournamentConfig {
    /// Create round-robin tournament config
    pub fn round_robin(games_per_match: usize) -> Self {
        Self {
            match_config: MatchConfig::new(games_per_match),
            ..Default::default()
        }
    }

    /// Run everything on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self.match_config.parallel = false;
        self
    }
}
