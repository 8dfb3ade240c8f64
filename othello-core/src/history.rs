//! Move history for undo

use crate::board::{Board, Pos, Side};
use crate::error::EngineError;

/// Snapshot taken right before a move was applied
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub board: Board,
    pub mover: Side,
    pub legal_moves: Vec<Pos>,
}

/// LIFO stack of snapshots, exclusively owned by one game session
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of the pre-move position
    pub fn push(&mut self, board: &Board, mover: Side, legal_moves: &[Pos]) {
        self.entries.push(HistoryEntry {
            board: *board,
            mover,
            legal_moves: legal_moves.to_vec(),
        });
    }

    pub fn pop(&mut self) -> Result<HistoryEntry, EngineError> {
        self.entries.pop().ok_or(EngineError::NothingToUndo)
    }

    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{apply_move, legal_moves};

    #[test]
    fn test_pop_empty_reports_nothing_to_undo() {
        let mut history = HistoryStack::new();
        assert_eq!(history.pop(), Err(EngineError::NothingToUndo));
    }

    #[test]
    fn test_snapshot_is_not_aliased_with_live_board() {
        let mut board = Board::new();
        let legal = legal_moves(&board, Side::A);
        let mut history = HistoryStack::new();
        history.push(&board, Side::A, &legal);

        apply_move(&mut board, legal[0], Side::A);

        let entry = history.pop().unwrap();
        assert_eq!(entry.board, Board::new());
        assert_eq!(entry.mover, Side::A);
        assert_eq!(entry.legal_moves, legal);
        assert_ne!(entry.board, board);
    }

    #[test]
    fn test_lifo_order() {
        let mut history = HistoryStack::new();
        history.push(&Board::new(), Side::A, &[]);
        history.push(&Board::empty(), Side::B, &[]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek().map(|e| e.mover), Some(Side::B));

        assert_eq!(history.pop().unwrap().mover, Side::B);
        assert_eq!(history.pop().unwrap().mover, Side::A);
        assert!(history.is_empty());
    }
}
