//! Legality and flip-capture rules

use crate::board::{Board, Pos, Side, DIRECTIONS};

/// A placement together with what it captures in each of the 8 directions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub pos: Pos,
    pub mover: Side,
    /// Indexed like `DIRECTIONS`
    pub captures: [Vec<Pos>; 8],
}

impl Move {
    /// Compute per-direction captures for `mover` placing at `pos`.
    /// An occupied target yields no captures.
    pub fn compute(board: &Board, pos: Pos, mover: Side) -> Self {
        let captures = if board.is_empty_at(pos) {
            DIRECTIONS.map(|(dr, dc)| captures_in_direction(board, pos, dr, dc, mover))
        } else {
            Default::default()
        };
        Self { pos, mover, captures }
    }

    pub fn is_legal(&self) -> bool {
        self.captures.iter().any(|line| !line.is_empty())
    }

    /// Every captured cell, direction by direction
    pub fn flips(&self) -> impl Iterator<Item = Pos> + '_ {
        self.captures.iter().flatten().copied()
    }

    pub fn flip_count(&self) -> usize {
        self.captures.iter().map(Vec::len).sum()
    }
}

/// Walk outward from `pos` collecting contiguous opponent cells. The run counts
/// only if it is closed by a `mover` cell; otherwise nothing is captured.
pub fn captures_in_direction(
    board: &Board,
    pos: Pos,
    dr: i8,
    dc: i8,
    mover: Side,
) -> Vec<Pos> {
    let opponent = mover.opponent();
    let mut line = Vec::new();
    let mut current = pos.step(dr, dc);

    while let Some(p) = current {
        match board.at(p) {
            Some(owner) if owner == opponent => line.push(p),
            Some(_) => return line,
            None => break,
        }
        current = p.step(dr, dc);
    }

    Vec::new()
}

pub fn is_legal_move(board: &Board, pos: Pos, mover: Side) -> bool {
    board.is_empty_at(pos)
        && DIRECTIONS
            .iter()
            .any(|&(dr, dc)| !captures_in_direction(board, pos, dr, dc, mover).is_empty())
}

/// Full-board scan in row-major order
pub fn legal_moves(board: &Board, mover: Side) -> Vec<Pos> {
    Pos::all()
        .filter(|&pos| is_legal_move(board, pos, mover))
        .collect()
}

pub fn has_legal_move(board: &Board, mover: Side) -> bool {
    Pos::all().any(|pos| is_legal_move(board, pos, mover))
}

/// Place at `pos` and flip every captured cell. Returns the flipped cells.
/// Does not re-validate: callers check `is_legal_move` first.
pub fn apply_move(board: &mut Board, pos: Pos, mover: Side) -> Vec<Pos> {
    let mv = Move::compute(board, pos, mover);
    board.put(pos, mover);
    let flipped: Vec<Pos> = mv.flips().collect();
    for &p in &flipped {
        board.put(p, mover);
    }
    flipped
}

/// Over when neither side can move, regardless of whose turn it is
pub fn is_terminal(board: &Board) -> bool {
    !has_legal_move(board, Side::A) && !has_legal_move(board, Side::B)
}
