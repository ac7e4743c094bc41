//! Commonly used types and utilities for ease of import.

pub use crate::{
    choose_move, AiPlayer, Animal, Board, Difficulty, GameEvent, GameSession, GameSnapshot, Move,
    MoveError, Phase, Player, Side, WinReason,
};

pub use crate::player::cli::print_game;
pub use crate::{CliPlayer, PlayerNode};

pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
