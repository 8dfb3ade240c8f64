//! Session configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::{AiPlayer, Difficulty};
use crate::error::EngineError;
use crate::eval::Heuristics;
use crate::game::{Color, GameState, PlayerSlot, Players};

/// Everything needed to start a session: seats, who opens, AI tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub player_a: PlayerSlot,
    pub player_b: PlayerSlot,
    /// Resolved by the caller (coin flip, menu, ...)
    pub first_mover: Color,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    /// Seed for the randomized tiers (None = 42)
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub heuristics: Heuristics,
}

fn default_difficulty() -> Difficulty {
    Difficulty::Greedy
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player_a: PlayerSlot::human("red", "red"),
            player_b: PlayerSlot::computer("white", "white"),
            first_mover: Color::new("red"),
            difficulty: default_difficulty(),
            seed: None,
            heuristics: Heuristics::default(),
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading session config {}", path.display()))?;
        let config: SessionConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing session config {}", path.display()))?;
        Ok(config)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing session config {}", path.display()))?;
        Ok(())
    }

    pub fn players(&self) -> Result<Players, EngineError> {
        Players::new(self.player_a.clone(), self.player_b.clone())
    }

    /// Fresh game at the canonical start
    pub fn new_game(&self) -> Result<GameState, EngineError> {
        GameState::new(self.players()?, &self.first_mover)
    }

    /// Computer opponent for this session
    pub fn ai_player(&self) -> AiPlayer {
        let ai = match self.seed {
            Some(seed) => AiPlayer::with_seed(self.difficulty, seed),
            None => AiPlayer::new(self.difficulty),
        };
        ai.with_heuristics(self.heuristics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Side;
    use crate::game::Controller;

    #[test]
    fn test_parse_minimal_json() {
        let json = r#"{
            "player_a": { "color": "crimson", "name": "Hana", "controller": "human" },
            "player_b": { "color": "ivory", "name": "CPU", "controller": "computer" },
            "first_mover": "ivory",
            "difficulty": 4
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.difficulty, Difficulty::Minimax);
        assert_eq!(config.seed, None);
        assert_eq!(config.heuristics, Heuristics::default());
        assert_eq!(config.player_b.controller, Controller::Computer);

        let game = config.new_game().unwrap();
        assert_eq!(game.mover(), Some(Side::B));
        assert_eq!(config.ai_player().difficulty(), Difficulty::Minimax);
    }

    #[test]
    fn test_rejects_bad_difficulty() {
        let json = r#"{
            "player_a": { "color": "red", "name": "a", "controller": "human" },
            "player_b": { "color": "white", "name": "b", "controller": "human" },
            "first_mover": "red",
            "difficulty": 9
        }"#;
        assert!(serde_json::from_str::<SessionConfig>(json).is_err());
    }

    #[test]
    fn test_duplicate_colors_rejected_at_game_start() {
        let config = SessionConfig {
            player_b: PlayerSlot::human("red", "other"),
            ..Default::default()
        };
        assert_eq!(
            config.new_game().unwrap_err(),
            EngineError::DuplicateColor("red".to_string())
        );
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("othello-session-{}.json", std::process::id()));
        let config = SessionConfig {
            seed: Some(7),
            difficulty: Difficulty::DeepMinimax,
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = SessionConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = SessionConfig::load(Path::new("/nonexistent/session.json")).unwrap_err();
        assert!(err.to_string().contains("reading session config"));
    }
}
