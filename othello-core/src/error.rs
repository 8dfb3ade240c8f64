//! Engine error taxonomy

/// Recoverable engine errors. A rejected operation never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("coordinate ({row}, {col}) is outside the 8x8 board")]
    OutOfBounds { row: usize, col: usize },

    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("cannot pass while a legal move is available")]
    MoveAvailable,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("game is already over")]
    GameOver,

    #[error("both players use color {0:?}")]
    DuplicateColor(String),

    #[error("color {0:?} is not registered in this game")]
    UnknownColor(String),

    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(u8),
}
