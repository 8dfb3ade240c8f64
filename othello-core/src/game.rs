//! Game session: players, turn/pass state machine, scoring and undo

use std::fmt;

use crate::ai::AiPlayer;
use crate::board::{Board, Pos, Side};
use crate::error::EngineError;
use crate::history::HistoryStack;
use crate::rules::{self, legal_moves};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// PLAYERS
// ============================================================================

/// Opaque color token chosen by the integrator ("red", "#ff0000", ...)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Color {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who makes the decisions for a slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    #[default]
    Human,
    Computer,
}

/// One seat at the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    pub color: Color,
    pub name: String,
    pub controller: Controller,
}

impl PlayerSlot {
    pub fn new(color: impl Into<Color>, name: impl Into<String>, controller: Controller) -> Self {
        Self {
            color: color.into(),
            name: name.into(),
            controller,
        }
    }

    pub fn human(color: impl Into<Color>, name: impl Into<String>) -> Self {
        Self::new(color, name, Controller::Human)
    }

    pub fn computer(color: impl Into<Color>, name: impl Into<String>) -> Self {
        Self::new(color, name, Controller::Computer)
    }
}

/// The two slots of a session. Colors are always distinct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Players {
    a: PlayerSlot,
    b: PlayerSlot,
}

impl Players {
    pub fn new(a: PlayerSlot, b: PlayerSlot) -> Result<Self, EngineError> {
        if a.color == b.color {
            return Err(EngineError::DuplicateColor(a.color.0));
        }
        Ok(Self { a, b })
    }

    pub fn slot(&self, side: Side) -> &PlayerSlot {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    pub fn color(&self, side: Side) -> &Color {
        &self.slot(side).color
    }

    pub fn side_of(&self, color: &Color) -> Option<Side> {
        if self.a.color == *color {
            Some(Side::A)
        } else if self.b.color == *color {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn is_computer(&self, side: Side) -> bool {
        self.slot(side).controller == Controller::Computer
    }

    pub fn is_human_vs_computer(&self) -> bool {
        self.a.controller != self.b.controller
    }

    fn slot_mut(&mut self, side: Side) -> &mut PlayerSlot {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }
}

// ============================================================================
// STATUS AND REPORTS
// ============================================================================

/// Cell tally per slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub a: u32,
    pub b: u32,
}

impl Score {
    pub fn of(board: &Board) -> Self {
        Self {
            a: board.count(Side::A),
            b: board.count(Side::B),
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    /// `None` on a draw
    pub fn winner(&self) -> Option<Side> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Lifecycle of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress { mover: Side },
    Over { score: Score },
}

/// Game result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Winner(Color),
    Draw,
}

/// What happened to the turn after an action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnChange {
    /// Normal alternation
    Next(Side),
    /// `skipped` had no legal move, so the same mover goes again
    PassedBack { skipped: Side },
    /// Neither side can move
    GameOver(Score),
}

/// Diff produced by a placement, for a presentation layer to animate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub mover: Side,
    pub placed: Pos,
    pub flipped: Vec<Pos>,
    pub turn: TurnChange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub passed: Side,
    pub turn: TurnChange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoReport {
    pub plies_undone: usize,
    pub mover: Side,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One live session: board, players, turn state and history
#[derive(Clone, Debug)]
pub struct GameState {
    players: Players,
    board: Board,
    status: GameStatus,
    /// Legal moves of the current mover, recomputed on every turn change
    legal: Vec<Pos>,
    first_mover: Side,
    history: HistoryStack,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Human-vs-human game named after its colors
    pub fn new_game(
        color_a: impl Into<Color>,
        color_b: impl Into<Color>,
        first_mover: impl Into<Color>,
    ) -> Result<Self, EngineError> {
        let color_a = color_a.into();
        let color_b = color_b.into();
        let players = Players::new(
            PlayerSlot::human(color_a.clone(), color_a.as_str()),
            PlayerSlot::human(color_b.clone(), color_b.as_str()),
        )?;
        Self::new(players, &first_mover.into())
    }

    /// Canonical start with the given seats; `first_mover` is resolved by the caller
    pub fn new(players: Players, first_mover: &Color) -> Result<Self, EngineError> {
        let mover = players
            .side_of(first_mover)
            .ok_or_else(|| EngineError::UnknownColor(first_mover.as_str().to_string()))?;
        Ok(Self::from_position(players, Board::new(), mover))
    }

    /// Arbitrary position with `mover` to play. A position where neither side
    /// can move starts out over.
    pub fn from_position(players: Players, board: Board, mover: Side) -> Self {
        let mut state = Self {
            players,
            board,
            status: GameStatus::InProgress { mover },
            legal: legal_moves(&board, mover),
            first_mover: mover,
            history: HistoryStack::new(),
        };
        if rules::is_terminal(&state.board) {
            state.finish();
        }
        state
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move, `None` once the game is over
    pub fn mover(&self) -> Option<Side> {
        match self.status {
            GameStatus::InProgress { mover } => Some(mover),
            GameStatus::Over { .. } => None,
        }
    }

    pub fn mover_color(&self) -> Option<&Color> {
        self.mover().map(|side| self.players.color(side))
    }

    /// Cached legal moves of the current mover
    pub fn legal_moves(&self) -> &[Pos] {
        &self.legal
    }

    /// Cells worth highlighting for the current mover
    pub fn hint(&self) -> &[Pos] {
        self.legal_moves()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over { .. })
    }

    /// Color owning a cell
    pub fn cell(&self, row: usize, col: usize) -> Result<Option<&Color>, EngineError> {
        Ok(self.board.get(row, col)?.map(|side| self.players.color(side)))
    }

    pub fn tally(&self) -> Score {
        Score::of(&self.board)
    }

    /// Cell count per color
    pub fn score(&self) -> FxHashMap<Color, u32> {
        let tally = self.tally();
        let mut score = FxHashMap::default();
        score.insert(self.players.color(Side::A).clone(), tally.a);
        score.insert(self.players.color(Side::B).clone(), tally.b);
        score
    }

    pub fn result(&self) -> GameResult {
        match self.status {
            GameStatus::InProgress { .. } => GameResult::Ongoing,
            GameStatus::Over { score } => match score.winner() {
                Some(side) => GameResult::Winner(self.players.color(side).clone()),
                None => GameResult::Draw,
            },
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Display names are labels only; the rules never look at them
    pub fn set_player_name(&mut self, side: Side, name: impl Into<String>) {
        self.players.slot_mut(side).name = name.into();
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Place the current mover's piece at `(row, col)`
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<MoveReport, EngineError> {
        let mover = self.mover().ok_or(EngineError::GameOver)?;
        let pos = Pos::new(row, col)?;
        if !self.legal.contains(&pos) {
            return Err(EngineError::IllegalMove { row, col });
        }

        self.history.push(&self.board, mover, &self.legal);
        let flipped = rules::apply_move(&mut self.board, pos, mover);
        let turn = self.advance_after_move(mover);

        tracing::debug!(
            "{} played ({}, {}) flipping {} -> {:?}",
            self.players.color(mover),
            row,
            col,
            flipped.len(),
            turn
        );

        Ok(MoveReport {
            mover,
            placed: pos,
            flipped,
            turn,
        })
    }

    /// Skip the turn; only allowed when the mover has no legal move
    pub fn pass(&mut self) -> Result<PassReport, EngineError> {
        let mover = self.mover().ok_or(EngineError::GameOver)?;
        if !self.legal.is_empty() {
            return Err(EngineError::MoveAvailable);
        }

        let next = mover.opponent();
        let next_moves = legal_moves(&self.board, next);
        let turn = if next_moves.is_empty() {
            self.finish()
        } else {
            self.status = GameStatus::InProgress { mover: next };
            self.legal = next_moves;
            TurnChange::Next(next)
        };

        tracing::debug!("{} passed -> {:?}", self.players.color(mover), turn);
        Ok(PassReport {
            passed: mover,
            turn,
        })
    }

    /// Ask `ai` for the current mover's move. `Ok(None)` means the mover must pass.
    pub fn ai_move(&self, ai: &mut AiPlayer) -> Result<Option<Pos>, EngineError> {
        let mover = self.mover().ok_or(EngineError::GameOver)?;
        Ok(ai.choose_move(&self.board, mover))
    }

    /// Let `ai` play for every computer-controlled mover until a human is to
    /// move or the game ends
    pub fn play_computer_turns(&mut self, ai: &mut AiPlayer) -> Result<Vec<MoveReport>, EngineError> {
        let mut reports = Vec::new();
        while let Some(mover) = self.mover() {
            if !self.players.is_computer(mover) {
                break;
            }
            match self.ai_move(ai)? {
                Some(pos) => reports.push(self.apply_move(pos.row as usize, pos.col as usize)?),
                None => {
                    self.pass()?;
                }
            }
        }
        Ok(reports)
    }

    /// Step back through history. Against a computer, keeps popping until a
    /// human is to move again; otherwise one ply. Always leaves the game in
    /// progress.
    pub fn undo(&mut self) -> Result<UndoReport, EngineError> {
        let mut restored = self.history.pop()?;
        let mut plies_undone = 1;

        if self.players.is_human_vs_computer() && self.players.is_computer(restored.mover) {
            if let Ok(earlier) = self.history.pop() {
                restored = earlier;
                plies_undone += 1;
            }
        }

        self.board = restored.board;
        self.status = GameStatus::InProgress {
            mover: restored.mover,
        };
        self.legal = restored.legal_moves;

        tracing::debug!(
            "undid {} ply(s), {} to move",
            plies_undone,
            self.players.color(restored.mover)
        );
        Ok(UndoReport {
            plies_undone,
            mover: restored.mover,
        })
    }

    /// Back to the canonical start with the original first mover
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.status = GameStatus::InProgress {
            mover: self.first_mover,
        };
        self.legal = legal_moves(&self.board, self.first_mover);
        self.history.clear();
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn advance_after_move(&mut self, mover: Side) -> TurnChange {
        let other = mover.opponent();
        let other_moves = legal_moves(&self.board, other);
        if !other_moves.is_empty() {
            self.status = GameStatus::InProgress { mover: other };
            self.legal = other_moves;
            return TurnChange::Next(other);
        }

        let own_moves = legal_moves(&self.board, mover);
        if own_moves.is_empty() {
            return self.finish();
        }

        self.status = GameStatus::InProgress { mover };
        self.legal = own_moves;
        TurnChange::PassedBack { skipped: other }
    }

    fn finish(&mut self) -> TurnChange {
        let score = Score::of(&self.board);
        self.status = GameStatus::Over { score };
        self.legal.clear();
        tracing::debug!("game over: {} - {}", score.a, score.b);
        TurnChange::GameOver(score)
    }
}

// ============================================================================
// TESTS
// ============================================================================
