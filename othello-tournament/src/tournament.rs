//! Tournament execution - round-robin ladder
//!
//! Level 1 - Orchestration

use othello_core::{Difficulty, EngineError};
use rayon::prelude::*;

use crate::config::{AiConfig, TournamentConfig};
use crate::match_play::{play_match, play_match_parallel, MatchResult};

/// Standing of a participant in the tournament
#[derive(Clone, Debug)]
pub struct Standing {
    /// Index of the participant in the original array
    pub index: usize,
    pub difficulty: Difficulty,
    /// Total score (wins + 0.5 * draws)
    pub score: f32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
    /// Average final disc difference
    pub avg_margin: f32,
    /// Buchholz score (sum of opponents' scores, for tiebreaking)
    pub buchholz: f32,
}

impl Standing {
    pub fn win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.games_played as f32
        }
    }

    /// Normalized score (0.0 to 1.0)
    pub fn normalized_score(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.score / self.games_played as f32
        }
    }
}

/// Result of a tournament
#[derive(Clone, Debug)]
pub struct TournamentResult {
    /// Final standings sorted by score (descending)
    pub standings: Vec<Standing>,
    /// All match results, `[i][j]` for `i < j` with `i` as the `a` side
    pub match_results: Vec<Vec<Option<MatchResult>>>,
}

impl TournamentResult {
    /// Get winner (top standing)
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Get top N performers
    pub fn top_n(&self, n: usize) -> &[Standing] {
        let n = n.min(self.standings.len());
        &self.standings[..n]
    }

    /// Get standing for a specific participant index
    pub fn standing_for(&self, index: usize) -> Option<&Standing> {
        self.standings.iter().find(|s| s.index == index)
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a round-robin tournament (Level 1 orchestration)
///
/// # Arguments
/// * `participants` - AI configurations to rank
/// * `config` - Tournament configuration
///
/// # Returns
/// Tournament results with final standings
pub fn run_tournament(
    participants: &[AiConfig],
    config: &TournamentConfig,
) -> Result<TournamentResult, EngineError> {
    let pairings = generate_round_robin_pairings(participants.len());
    tracing::info!(
        "round robin: {} participants, {} pairings, {} games each",
        participants.len(),
        pairings.len(),
        config.match_config.games_per_match
    );

    let match_results = execute_all_matches(participants, &pairings, config)?;
    let standings = compute_standings(participants, &match_results);

    if let Some(top) = standings.first() {
        tracing::info!(
            "winner: #{} {:?} with {:.1} points",
            top.index,
            top.difficulty,
            top.score
        );
    }

    Ok(TournamentResult {
        standings,
        match_results,
    })
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Generate all pairings for round-robin
fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

/// Execute all matches for round-robin
fn execute_all_matches(
    participants: &[AiConfig],
    pairings: &[(usize, usize)],
    config: &TournamentConfig,
) -> Result<Vec<Vec<Option<MatchResult>>>, EngineError> {
    let n = participants.len();
    let mut results: Vec<Vec<Option<MatchResult>>> = vec![vec![None; n]; n];

    let match_results: Vec<((usize, usize), MatchResult)> = if config.parallel {
        pairings
            .par_iter()
            .map(|&(i, j)| {
                execute_match(&participants[i], &participants[j], config)
                    .map(|result| ((i, j), result))
            })
            .collect::<Result<_, EngineError>>()?
    } else {
        pairings
            .iter()
            .map(|&(i, j)| {
                execute_match(&participants[i], &participants[j], config)
                    .map(|result| ((i, j), result))
            })
            .collect::<Result<_, EngineError>>()?
    };

    for ((i, j), result) in match_results {
        results[i][j] = Some(result);
    }

    Ok(results)
}

/// Execute a single match between two participants
fn execute_match(
    a: &AiConfig,
    b: &AiConfig,
    config: &TournamentConfig,
) -> Result<MatchResult, EngineError> {
    if config.match_config.parallel {
        play_match_parallel(a, b, &config.match_config)
    } else {
        play_match(a, b, &config.match_config)
    }
}

/// Compute final standings from match results
fn compute_standings(
    participants: &[AiConfig],
    results: &[Vec<Option<MatchResult>>],
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = participants
        .iter()
        .enumerate()
        .map(|(i, participant)| {
            let record = compute_record(i, results);
            let avg_margin = if record.games_played > 0 {
                record.avg_margin / record.games_played as f32
            } else {
                0.0
            };

            Standing {
                index: i,
                difficulty: participant.difficulty,
                score: record.score_for_a(),
                wins: record.a_wins,
                losses: record.b_wins,
                draws: record.draws,
                games_played: record.games_played,
                avg_margin,
                buchholz: 0.0, // Computed later
            }
        })
        .collect();

    let scores: Vec<f32> = standings.iter().map(|s| s.score).collect();
    for standing in &mut standings {
        standing.buchholz = compute_buchholz(standing.index, results, &scores);
    }

    // Sort by score (descending), then Buchholz (descending)
    standings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.buchholz
                    .partial_cmp(&a.buchholz)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    standings
}

/// Sum every match a player took part in, seen from that player's side.
/// `avg_margin` of the returned record holds the margin total, not the mean.
fn compute_record(player: usize, results: &[Vec<Option<MatchResult>>]) -> MatchResult {
    let mut record = MatchResult::empty();

    for opponent in 0..results.len() {
        if player == opponent {
            continue;
        }

        let result = match (&results[player][opponent], &results[opponent][player]) {
            (Some(result), _) => result.clone(),
            (None, Some(result)) => result.flipped(),
            (None, None) => continue,
        };

        record.a_wins += result.a_wins;
        record.b_wins += result.b_wins;
        record.draws += result.draws;
        record.games_played += result.games_played;
        record.avg_margin += result.avg_margin * result.games_played as f32;
    }

    record
}

/// Compute Buchholz score (sum of opponents' scores)
fn compute_buchholz(player: usize, results: &[Vec<Option<MatchResult>>], scores: &[f32]) -> f32 {
    let mut buchholz = 0.0f32;

    for opponent in 0..results.len() {
        if player == opponent {
            continue;
        }

        let played = results[player][opponent].is_some() || results[opponent][player].is_some();
        if played {
            buchholz += scores[opponent];
        }
    }

    buchholz
}
