//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use othello_core::{
    Color, EngineError, GameResult, GameState, PlayerSlot, Players, Pos, Score, Side,
};

use crate::config::AiConfig;

/// Color token of the first participant (always slot A)
pub const FIRST_COLOR: &str = "black";
/// Color token of the second participant (always slot B)
pub const SECOND_COLOR: &str = "white";

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Final game result, in terms of `FIRST_COLOR` / `SECOND_COLOR`
    pub result: GameResult,
    /// Final disc count
    pub score: Score,
    /// Placements in order
    pub moves: Vec<Pos>,
    /// Number of forced passes
    pub passes: u32,
}

impl GameOutcome {
    /// Winning slot (None for draw)
    pub fn winner(&self) -> Option<Side> {
        self.score.winner()
    }

    /// Check if the first participant won
    pub fn first_wins(&self) -> bool {
        self.winner() == Some(Side::A)
    }

    /// Check if the second participant won
    pub fn second_wins(&self) -> bool {
        self.winner() == Some(Side::B)
    }

    pub fn is_draw(&self) -> bool {
        self.result == GameResult::Draw
    }

    /// Disc difference from the first participant's point of view
    pub fn margin(&self) -> i32 {
        self.score.a as i32 - self.score.b as i32
    }
}

/// Plays complete games between two AI configurations
pub struct GameRunner {
    /// Random seed counter
    seed_counter: u64,
}

impl GameRunner {
    /// Create a new game runner
    pub fn new(seed: u64) -> Self {
        Self { seed_counter: seed }
    }

    /// Play one game from the canonical start. `first` sits in slot A,
    /// `second` in slot B, and `first_mover` opens.
    pub fn play_game(
        &mut self,
        first: &AiConfig,
        second: &AiConfig,
        first_mover: Side,
    ) -> Result<GameOutcome, EngineError> {
        let seed = self.next_seed();
        let mut first_ai = first.player(seed);
        let mut second_ai = second.player(seed.wrapping_add(1));

        let players = Players::new(
            PlayerSlot::computer(FIRST_COLOR, format!("{:?}", first.difficulty)),
            PlayerSlot::computer(SECOND_COLOR, format!("{:?}", second.difficulty)),
        )?;
        let opener = Color::new(match first_mover {
            Side::A => FIRST_COLOR,
            Side::B => SECOND_COLOR,
        });
        let mut game = GameState::new(players, &opener)?;

        let mut moves = Vec::new();
        let mut passes = 0;
        while let Some(mover) = game.mover() {
            let ai = match mover {
                Side::A => &mut first_ai,
                Side::B => &mut second_ai,
            };
            match game.ai_move(ai)? {
                Some(pos) => {
                    game.apply_move(pos.row as usize, pos.col as usize)?;
                    moves.push(pos);
                }
                None => {
                    game.pass()?;
                    passes += 1;
                }
            }
        }

        let outcome = GameOutcome {
            result: game.result(),
            score: game.tally(),
            moves,
            passes,
        };
        tracing::debug!(
            "{:?} vs {:?} (seed {}): {} - {} after {} moves",
            first.difficulty,
            second.difficulty,
            seed,
            outcome.score.a,
            outcome.score.b,
            outcome.moves.len()
        );
        Ok(outcome)
    }

    /// Get next seed and increment counter
    fn next_seed(&mut self) -> u64 {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        seed
    }

    /// Reset seed counter
    pub fn reset_seed(&mut self, seed: u64) {
        self.seed_counter = seed;
    }
}
