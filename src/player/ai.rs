use crate::core::{ai, Difficulty, GameSnapshot, Move, SearchLimits};
use rand::rngs::SmallRng;

use super::Player;

/// Computer opponent backed by the search engine.
pub struct AiPlayer {
    difficulty: Difficulty,
    limits: SearchLimits,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            limits: SearchLimits::default(),
        }
    }

    /// Cap the number of nodes searched per move.
    pub fn with_node_budget(mut self, max_nodes: u64) -> Self {
        self.limits.max_nodes = Some(max_nodes);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

impl Player for AiPlayer {
    fn select_move(&mut self, rng: &mut SmallRng, game: &GameSnapshot) -> Option<Move> {
        ai::choose_move_with_limits(&game.board, game.current, self.difficulty, self.limits, rng)
    }
}
