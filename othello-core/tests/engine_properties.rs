//! Integration tests for the Othello engine
//!
//! Checks rule invariants over many seeded random playouts, plus the
//! session-level scenarios an integrating UI relies on.

use othello_core::{
    ai::{search_move, AiPlayer, Difficulty},
    board::{Board, Pos, Side, DIRECTIONS},
    eval::Heuristics,
    game::{Color, GameResult, GameState, PlayerSlot, Players, TurnChange},
    rules::{apply_move, captures_in_direction, is_legal_move, is_terminal, legal_moves},
    EngineError,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn humans() -> Players {
    Players::new(
        PlayerSlot::human("red", "Aka"),
        PlayerSlot::human("white", "Shiro"),
    )
    .unwrap()
}

/// Every position reached by a seeded random playout, with the side to move
fn random_playout(seed: u64) -> Vec<(Board, Side)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut mover = Side::A;
    let mut positions = Vec::new();

    while !is_terminal(&board) {
        positions.push((board, mover));
        let moves = legal_moves(&board, mover);
        if let Some(&pos) = moves.choose(&mut rng) {
            apply_move(&mut board, pos, mover);
        }
        mover = mover.opponent();
    }
    positions.push((board, mover));
    positions
}

fn set(board: &mut Board, cells: &[(usize, usize)], side: Side) {
    for &(row, col) in cells {
        board.set(row, col, side).unwrap();
    }
}

// ============================================================================
// RULE INVARIANTS
// ============================================================================

#[test]
fn test_piece_conservation() {
    for seed in 0..8 {
        for (board, mover) in random_playout(seed) {
            for pos in legal_moves(&board, mover) {
                let mut next = board;
                apply_move(&mut next, pos, mover);
                let before = board.count(Side::A) + board.count(Side::B);
                let after = next.count(Side::A) + next.count(Side::B);
                assert_eq!(after, before + 1);
            }
        }
    }
}

#[test]
fn test_flip_symmetry() {
    for seed in 0..4 {
        for (board, mover) in random_playout(seed) {
            for pos in legal_moves(&board, mover) {
                let mut seen = HashSet::new();
                for &(dr, dc) in &DIRECTIONS {
                    for cell in captures_in_direction(&board, pos, dr, dc, mover) {
                        assert!(seen.insert(cell), "{:?} captured twice", cell);
                    }
                }

                let mut next = board;
                let flipped = apply_move(&mut next, pos, mover);
                let changed: HashSet<Pos> = Pos::all()
                    .filter(|&p| p != pos && board.at(p) != next.at(p))
                    .collect();
                assert_eq!(changed, seen);
                assert_eq!(flipped.into_iter().collect::<HashSet<_>>(), seen);
            }
        }
    }
}

#[test]
fn test_legality_soundness() {
    for seed in 10..14 {
        for (board, mover) in random_playout(seed) {
            let legal: HashSet<Pos> = legal_moves(&board, mover).into_iter().collect();
            for pos in Pos::all() {
                assert_eq!(is_legal_move(&board, pos, mover), legal.contains(&pos));
            }
        }
    }
}

#[test]
fn test_terminal_correctness() {
    for seed in 20..26 {
        for (board, _) in random_playout(seed) {
            let both_stuck =
                legal_moves(&board, Side::A).is_empty() && legal_moves(&board, Side::B).is_empty();
            assert_eq!(is_terminal(&board), both_stuck);
        }
    }
}

// ============================================================================
// SESSION SCENARIOS
// ============================================================================

#[test]
fn test_opening_scenario() {
    init_tracing();
    let mut game = GameState::new_game("red", "white", "red").unwrap();
    let report = game.apply_move(2, 3).unwrap();

    assert_eq!(report.flipped.len(), 1);
    let score = game.score();
    assert_eq!(score[&Color::new("red")], 4);
    assert_eq!(score[&Color::new("white")], 1);
}

#[test]
fn test_undo_round_trip_over_a_whole_game() {
    let mut game = GameState::new_game("red", "white", "red").unwrap();
    let mut ai = AiPlayer::with_seed(Difficulty::Random, 11);

    while !game.is_over() {
        let board = *game.board();
        let mover = game.mover();
        let legal = game.legal_moves().to_vec();

        match game.ai_move(&mut ai).unwrap() {
            Some(pos) => {
                game.apply_move(pos.row as usize, pos.col as usize).unwrap();
                game.undo().unwrap();
                assert_eq!(*game.board(), board);
                assert_eq!(game.mover(), mover);
                assert_eq!(game.legal_moves(), legal.as_slice());
                game.apply_move(pos.row as usize, pos.col as usize).unwrap();
            }
            None => {
                game.pass().unwrap();
            }
        }
    }

    assert_ne!(game.result(), GameResult::Ongoing);
}

#[test]
fn test_stuck_mover_scenario() {
    // A has nothing to flank, B can capture along the top edge
    let mut board = Board::empty();
    set(&mut board, &[(0, 0), (0, 1)], Side::B);
    set(&mut board, &[(0, 2)], Side::A);
    set(&mut board, &[(5, 5)], Side::B);
    let mut game = GameState::from_position(humans(), board, Side::A);
    assert!(game.legal_moves().is_empty());

    for pos in Pos::all() {
        assert!(matches!(
            game.apply_move(pos.row as usize, pos.col as usize),
            Err(EngineError::IllegalMove { .. })
        ));
    }
    let report = game.pass().unwrap();
    assert_eq!(report.turn, TurnChange::Next(Side::B));
    assert_eq!(game.mover_color(), Some(&Color::new("white")));
}

#[test]
fn test_both_stuck_scenario() {
    let mut board = Board::empty();
    set(&mut board, &[(0, 0), (0, 7), (7, 0)], Side::A);
    set(&mut board, &[(3, 3), (4, 4)], Side::B);
    let game = GameState::from_position(humans(), board, Side::B);

    assert!(game.is_over());
    let score = game.score();
    assert_eq!(score[&Color::new("red")], 3);
    assert_eq!(score[&Color::new("white")], 2);
    assert_eq!(game.result(), GameResult::Winner(Color::new("red")));
}

// ============================================================================
// AI
// ============================================================================

#[test]
fn test_minimax_is_deterministic_over_a_game() {
    let h = Heuristics::default();
    for (board, mover) in random_playout(3).into_iter().step_by(9) {
        if legal_moves(&board, mover).is_empty() {
            continue;
        }
        let first = search_move(&board, mover, 3, &h);
        let second = search_move(&board, mover, 3, &h);
        assert_eq!(first, second);
        let best = first.best.expect("mover has legal moves");
        assert!(is_legal_move(&board, best, mover));
    }
}

#[test]
fn test_greedy_beats_random_at_least_once() {
    let mut greedy_wins = 0;
    for seed in 0..4u64 {
        let players = Players::new(
            PlayerSlot::computer("black", "greedy"),
            PlayerSlot::computer("white", "random"),
        )
        .unwrap();
        let first = if seed % 2 == 0 { "black" } else { "white" };
        let mut game = GameState::new(players, &Color::new(first)).unwrap();
        let mut strong = AiPlayer::with_seed(Difficulty::Greedy, seed);
        let mut weak = AiPlayer::with_seed(Difficulty::Random, seed);

        while let Some(mover) = game.mover() {
            let ai = if mover == Side::A { &mut strong } else { &mut weak };
            match game.ai_move(ai).unwrap() {
                Some(pos) => {
                    game.apply_move(pos.row as usize, pos.col as usize).unwrap();
                }
                None => {
                    game.pass().unwrap();
                }
            }
        }

        if game.result() == GameResult::Winner(Color::new("black")) {
            greedy_wins += 1;
        }
    }
    assert!(greedy_wins >= 1);
}
