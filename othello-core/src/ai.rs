//! Computer opponent: five difficulty tiers

use crate::board::{Board, Pos, Side};
use crate::error::EngineError;
use crate::eval::{evaluate_board, move_score, Heuristics, Phase};
use crate::rules::{apply_move, has_legal_move, legal_moves, Move};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Chance that the corner-seeking tier grabs an available corner
const CORNER_PROBABILITY: f64 = 0.8;

/// Search depths (normal, endgame) for the minimax tiers
const MINIMAX_DEPTHS: (u32, u32) = (4, 6);
const DEEP_MINIMAX_DEPTHS: (u32, u32) = (7, 10);

const DEFAULT_SEED: u64 = 42;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Difficulty tier, 1 (weakest) to 5
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// Uniform choice among legal moves
    Random = 1,
    /// Grabs corners most of the time, otherwise flip-weighted random
    CornerSeeking = 2,
    /// Static move formula with a one-reply lookahead
    Greedy = 3,
    /// Alpha-beta minimax, depth 4 (6 in the endgame)
    Minimax = 4,
    /// Alpha-beta minimax, depth 7 (10 in the endgame)
    DeepMinimax = 5,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Random,
        Difficulty::CornerSeeking,
        Difficulty::Greedy,
        Difficulty::Minimax,
        Difficulty::DeepMinimax,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Minimax depth for this tier, `None` for the non-searching tiers
    pub fn search_depth(self, phase: Phase) -> Option<u32> {
        let (normal, endgame) = match self {
            Difficulty::Minimax => MINIMAX_DEPTHS,
            Difficulty::DeepMinimax => DEEP_MINIMAX_DEPTHS,
            _ => return None,
        };
        Some(if phase == Phase::Endgame { endgame } else { normal })
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = EngineError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Difficulty::ALL
            .get((level as usize).wrapping_sub(1))
            .copied()
            .ok_or(EngineError::InvalidDifficulty(level))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> u8 {
        difficulty.level()
    }
}

// ============================================================================
// AI PLAYER
// ============================================================================

/// Computer player bound to one difficulty for a whole session
pub struct AiPlayer {
    difficulty: Difficulty,
    heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, DEFAULT_SEED)
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            heuristics: Heuristics::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    /// Pick a move for `mover`, or `None` when it has no legal move
    pub fn choose_move(&mut self, board: &Board, mover: Side) -> Option<Pos> {
        let moves = legal_moves(board, mover);
        if moves.is_empty() {
            return None;
        }
        if moves.len() == 1 {
            return Some(moves[0]);
        }

        match self.difficulty {
            Difficulty::Random => moves.choose(&mut self.rng).copied(),
            Difficulty::CornerSeeking => self.corner_seeking(board, mover, &moves),
            Difficulty::Greedy => greedy_move(board, mover, &moves, &self.heuristics),
            Difficulty::Minimax | Difficulty::DeepMinimax => {
                let phase = self.heuristics.phase(board);
                let depth = self.difficulty.search_depth(phase).unwrap_or(MINIMAX_DEPTHS.0);
                search_move(board, mover, depth, &self.heuristics).best
            }
        }
    }

    fn corner_seeking(&mut self, board: &Board, mover: Side, moves: &[Pos]) -> Option<Pos> {
        let corners: Vec<Pos> = moves.iter().copied().filter(|p| p.is_corner()).collect();
        if !corners.is_empty() && self.rng.gen_bool(CORNER_PROBABILITY) {
            return corners.choose(&mut self.rng).copied();
        }

        // Bigger captures are likelier, not certain
        let weights: Vec<usize> = moves
            .iter()
            .map(|&pos| Move::compute(board, pos, mover).flip_count())
            .collect();
        match WeightedIndex::new(&weights) {
            Ok(dist) => Some(moves[dist.sample(&mut self.rng)]),
            Err(_) => moves.choose(&mut self.rng).copied(),
        }
    }
}

// ============================================================================
// GREEDY
// ============================================================================

/// Static formula minus the opponent's best static reply
fn greedy_move(board: &Board, mover: Side, moves: &[Pos], heuristics: &Heuristics) -> Option<Pos> {
    let opponent = mover.opponent();
    let mut best_move = None;
    let mut best_score = f32::NEG_INFINITY;

    for &pos in moves {
        let mv = Move::compute(board, pos, mover);
        let mut score = move_score(board, &mv, heuristics);

        let mut next = *board;
        apply_move(&mut next, pos, mover);
        let reply = legal_moves(&next, opponent)
            .into_iter()
            .map(|p| move_score(&next, &Move::compute(&next, p, opponent), heuristics))
            .fold(f32::NEG_INFINITY, f32::max);
        if reply.is_finite() {
            score -= reply;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(pos);
        }
    }

    best_move
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Search outcome: score from the root mover's perspective and the move that
/// achieves it (`None` at leaves and pass nodes)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub score: f32,
    pub best: Option<Pos>,
}

/// Alpha-beta minimax over cloned boards
pub struct Search<'a> {
    root: Side,
    heuristics: &'a Heuristics,
    nodes: u64,
}

impl<'a> Search<'a> {
    pub fn new(root: Side, heuristics: &'a Heuristics) -> Self {
        Self {
            root,
            heuristics,
            nodes: 0,
        }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn minimax(
        &mut self,
        board: &Board,
        to_move: Side,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        maximizing: bool,
    ) -> SearchResult {
        self.nodes += 1;

        if depth == 0 {
            return self.leaf(board);
        }

        let moves = legal_moves(board, to_move);
        if moves.is_empty() {
            if !has_legal_move(board, to_move.opponent()) {
                return self.leaf(board);
            }
            // A pass consumes a ply
            let passed = self.minimax(board, to_move.opponent(), depth - 1, alpha, beta, !maximizing);
            return SearchResult {
                score: passed.score,
                best: None,
            };
        }

        let mut best = SearchResult {
            score: if maximizing {
                f32::NEG_INFINITY
            } else {
                f32::INFINITY
            },
            best: None,
        };

        for pos in moves {
            let mut child = *board;
            apply_move(&mut child, pos, to_move);
            let score = self
                .minimax(&child, to_move.opponent(), depth - 1, alpha, beta, !maximizing)
                .score;

            if maximizing {
                if score > best.score {
                    best = SearchResult { score, best: Some(pos) };
                }
                alpha = alpha.max(score);
            } else {
                if score < best.score {
                    best = SearchResult { score, best: Some(pos) };
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }

    fn leaf(&self, board: &Board) -> SearchResult {
        SearchResult {
            score: evaluate_board(board, self.root, self.heuristics),
            best: None,
        }
    }
}

/// Root search for `mover` at a fixed depth
pub fn search_move(board: &Board, mover: Side, depth: u32, heuristics: &Heuristics) -> SearchResult {
    let mut search = Search::new(mover, heuristics);
    let result = search.minimax(board, mover, depth, f32::NEG_INFINITY, f32::INFINITY, true);
    tracing::trace!(
        "search depth={} nodes={} score={:.1} best={:?}",
        depth,
        search.nodes(),
        result.score,
        result.best
    );
    result
}

// ============================================================================
// TESTS
// ============================================================================
