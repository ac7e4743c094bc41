//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - AiPlayer: search-based computer opponent
//! - CliPlayer: Interactive command-line player
//! - PlayerNode: Orchestrator combining Player + GameSession + Transport

use crate::core::{GameSnapshot, Move, MoveOutcome};
use rand::rngs::SmallRng;

/// Interface implemented by different player types.
///
/// A Player only ever proposes moves; the session decides whether they are
/// legal and applies them.
pub trait Player: Send {
    /// Choose a move for `game.current`. `None` means no move is available.
    fn select_move(&mut self, rng: &mut SmallRng, game: &GameSnapshot) -> Option<Move>;

    /// Inform the player that its proposed move was rejected.
    fn handle_rejected_move(&mut self, _mv: Move, _reason: crate::core::MoveError) {}

    /// Inform the player of the result of its last move.
    fn handle_move_result(&mut self, _mv: Move, _outcome: &MoveOutcome) {}

    /// Inform the player of a move made by the opponent.
    fn handle_opponent_move(&mut self, _mv: Move, _outcome: &MoveOutcome) {}
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;

#[cfg(feature = "std")]
pub mod node;
#[cfg(feature = "std")]
pub use node::PlayerNode;
