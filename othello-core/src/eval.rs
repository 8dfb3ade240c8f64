//! Position evaluation

use crate::board::{Board, Pos, Side, BOARD_SIZE};
use crate::rules::{legal_moves, Move};
use serde::{Deserialize, Serialize};

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 100000.0;

/// Positional weights. Corners are gold, the cells touching an empty corner
/// hand it to the opponent.
const POSITION_TABLE: [[f32; BOARD_SIZE]; BOARD_SIZE] = [
    [100.0, -20.0, 10.0, 5.0, 5.0, 10.0, -20.0, 100.0],
    [-20.0, -50.0, -2.0, -2.0, -2.0, -2.0, -50.0, -20.0],
    [10.0, -2.0, 1.0, 1.0, 1.0, 1.0, -2.0, 10.0],
    [5.0, -2.0, 1.0, 0.0, 0.0, 1.0, -2.0, 5.0],
    [5.0, -2.0, 1.0, 0.0, 0.0, 1.0, -2.0, 5.0],
    [10.0, -2.0, 1.0, 1.0, 1.0, 1.0, -2.0, 10.0],
    [-20.0, -50.0, -2.0, -2.0, -2.0, -2.0, -50.0, -20.0],
    [100.0, -20.0, 10.0, 5.0, 5.0, 10.0, -20.0, 100.0],
];

/// Game phase by number of placed pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Opening,
    Middle,
    Endgame,
}

/// Blend weights for one phase
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub position: f32,
    pub mobility: f32,
    pub discs: f32,
}

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Per-cell positional weight
    pub position_table: [[f32; BOARD_SIZE]; BOARD_SIZE],
    /// Replaces the table weight of a corner neighbor once that corner is taken
    pub taken_corner_neighbor: f32,
    pub opening: PhaseWeights,
    pub middle: PhaseWeights,
    pub endgame: PhaseWeights,
    /// Placed pieces at which the middle game starts
    pub middle_from: u32,
    /// Placed pieces at which the endgame starts
    pub endgame_from: u32,
    /// Greedy move formula: bonus for taking a corner
    pub corner_bonus: f32,
    /// Greedy move formula: bonus for an edge cell
    pub edge_bonus: f32,
    /// Greedy move formula: penalty for a cell next to an empty corner
    pub corner_trap_penalty: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            position_table: POSITION_TABLE,
            taken_corner_neighbor: 5.0,
            // Early on, discs are a liability and mobility is everything
            opening: PhaseWeights {
                position: 1.0,
                mobility: 10.0,
                discs: -1.0,
            },
            middle: PhaseWeights {
                position: 1.0,
                mobility: 6.0,
                discs: 0.0,
            },
            endgame: PhaseWeights {
                position: 0.5,
                mobility: 2.0,
                discs: 10.0,
            },
            middle_from: 20,
            endgame_from: 45,
            corner_bonus: 100.0,
            edge_bonus: 10.0,
            corner_trap_penalty: 50.0,
        }
    }
}

impl Heuristics {
    pub fn phase(&self, board: &Board) -> Phase {
        let placed = board.occupied();
        if placed >= self.endgame_from {
            Phase::Endgame
        } else if placed >= self.middle_from {
            Phase::Middle
        } else {
            Phase::Opening
        }
    }

    pub fn weights(&self, phase: Phase) -> PhaseWeights {
        match phase {
            Phase::Opening => self.opening,
            Phase::Middle => self.middle,
            Phase::Endgame => self.endgame,
        }
    }

    /// Table weight, with corner neighbors neutralized once their corner is taken
    pub fn cell_weight(&self, board: &Board, pos: Pos) -> f32 {
        match pos.adjacent_corner() {
            Some(corner) if !board.is_empty_at(corner) => self.taken_corner_neighbor,
            _ => self.position_table[pos.row as usize][pos.col as usize],
        }
    }
}

/// Evaluate `board` from `perspective`'s point of view
pub fn evaluate_board(board: &Board, perspective: Side, heuristics: &Heuristics) -> f32 {
    let opponent = perspective.opponent();
    let my_mobility = legal_moves(board, perspective).len() as f32;
    let opp_mobility = legal_moves(board, opponent).len() as f32;
    let disc_diff = board.count(perspective) as f32 - board.count(opponent) as f32;

    // Decided game
    if my_mobility == 0.0 && opp_mobility == 0.0 {
        return if disc_diff > 0.0 {
            WIN_VALUE + disc_diff
        } else if disc_diff < 0.0 {
            -WIN_VALUE + disc_diff
        } else {
            0.0
        };
    }

    let weights = heuristics.weights(heuristics.phase(board));

    let mut positional = 0.0f32;
    for (pos, owner) in board.cells() {
        match owner {
            Some(side) if side == perspective => positional += heuristics.cell_weight(board, pos),
            Some(_) => positional -= heuristics.cell_weight(board, pos),
            None => {}
        }
    }

    weights.position * positional
        + weights.mobility * (my_mobility - opp_mobility)
        + weights.discs * disc_diff
}

/// Static score of a single placement for the greedy tier
pub fn move_score(board: &Board, mv: &Move, heuristics: &Heuristics) -> f32 {
    let mut score = mv.flip_count() as f32;

    if mv.pos.is_corner() {
        score += heuristics.corner_bonus;
    } else if mv.pos.is_edge() {
        score += heuristics.edge_bonus;
    }

    if let Some(corner) = mv.pos.adjacent_corner() {
        if board.is_empty_at(corner) {
            score -= heuristics.corner_trap_penalty;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Pos {
        Pos::new(row, col).unwrap()
    }

    #[test]
    fn test_evaluate_symmetric() {
        let board = Board::new();
        let h = Heuristics::default();
        assert_eq!(evaluate_board(&board, Side::A, &h), 0.0);
        assert_eq!(evaluate_board(&board, Side::B, &h), 0.0);
    }

    #[test]
    fn test_phase_thresholds() {
        let h = Heuristics::default();
        let mut board = Board::empty();
        assert_eq!(h.phase(&board), Phase::Opening);

        for p in Pos::all().take(20) {
            board.put(p, Side::A);
        }
        assert_eq!(h.phase(&board), Phase::Middle);

        for p in Pos::all().take(45) {
            board.put(p, Side::A);
        }
        assert_eq!(h.phase(&board), Phase::Endgame);
    }

    #[test]
    fn test_corner_neighbor_neutralized_once_corner_taken() {
        let h = Heuristics::default();
        let mut board = Board::empty();
        assert_eq!(h.cell_weight(&board, pos(1, 1)), -50.0);
        assert_eq!(h.cell_weight(&board, pos(0, 1)), -20.0);

        board.put(pos(0, 0), Side::B);
        assert_eq!(h.cell_weight(&board, pos(1, 1)), h.taken_corner_neighbor);
        assert_eq!(h.cell_weight(&board, pos(1, 0)), h.taken_corner_neighbor);
        // Other corners are unaffected
        assert_eq!(h.cell_weight(&board, pos(6, 6)), -50.0);
    }

    #[test]
    fn test_terminal_position_is_decisive() {
        let h = Heuristics::default();
        let mut board = Board::empty();
        board.put(pos(0, 0), Side::A);
        board.put(pos(7, 7), Side::B);
        board.put(pos(7, 6), Side::B);

        assert_eq!(evaluate_board(&board, Side::A, &h), -WIN_VALUE - 1.0);
        assert_eq!(evaluate_board(&board, Side::B, &h), WIN_VALUE + 1.0);
    }

    #[test]
    fn test_move_score_prefers_corner_over_trap() {
        let h = Heuristics::default();
        let mut board = Board::empty();
        // A can take the corner (0,0) or the X-square (1,1)
        board.put(pos(0, 1), Side::B);
        board.put(pos(0, 2), Side::A);
        board.put(pos(2, 2), Side::B);
        board.put(pos(3, 3), Side::A);

        let corner = Move::compute(&board, pos(0, 0), Side::A);
        let x_square = Move::compute(&board, pos(1, 1), Side::A);
        assert!(corner.is_legal());
        assert!(x_square.is_legal());

        assert_eq!(move_score(&board, &corner, &h), 101.0);
        assert_eq!(move_score(&board, &x_square, &h), -49.0);
    }

    #[test]
    fn test_default_heuristics() {
        let h = Heuristics::default();
        assert!(h.opening.mobility > h.opening.position);
        assert!(h.endgame.discs > h.endgame.mobility);
        assert_eq!(h.endgame.position * 2.0, h.middle.position);
    }
}
