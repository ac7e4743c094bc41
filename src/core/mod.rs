//! Core Animal Chess engine (no_std + alloc compatible)
//!
//! This module contains the pure game logic: terrain and board model, the
//! rules engine, the game session state machine and the search engine. Its
//! only dependencies are num-traits, rand (alloc) and the log facade, so it
//! also builds without the `std` feature.

pub mod ai;
pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod rules;

// Re-export commonly used types
pub use ai::{choose_move, choose_move_with_limits, evaluate, greedy_move, search, Difficulty, SearchLimits, SearchResult};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::{Board, Cell};
pub use common::{Animal, Move, MoveError, Piece, Side, Terrain, WinReason};
pub use config::*;
pub use game::{
    GameEvent, GameSession, GameSnapshot, MoveOutcome, MoveRecord, Phase, SelectOutcome,
    SubscriptionId, TurnToken,
};
pub use rules::{
    apply_move, can_capture, check_win, legal_moves, legal_moves_from, undo_move, validate_move,
    MoveEffect,
};
