//! Wire messages exchanged between two [`PlayerNode`](crate::PlayerNode)s.

use crate::core::{Move, Side, WinReason};

/// Bumped whenever the message layout changes.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages exchanged between peers. Moves carry plain coordinates and are
/// re-validated by the receiving session, never trusted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Sent by the peer playing `Side::First` to open a game.
    Handshake { version: u32 },
    HandshakeAck { version: u32 },
    /// A move committed by the sender. `seq` counts the sender's moves from 0.
    Move {
        version: u32,
        seq: u64,
        from: (u8, u8),
        to: (u8, u8),
    },
    /// Sent by the player whose move ended the game.
    GameOver {
        version: u32,
        winner: Side,
        reason: WinReason,
    },
}

impl Message {
    /// Wire form of a locally committed move.
    pub fn from_move(seq: u64, mv: Move) -> Self {
        Message::Move {
            version: PROTOCOL_VERSION,
            seq,
            from: (mv.from.0 as u8, mv.from.1 as u8),
            to: (mv.to.0 as u8, mv.to.1 as u8),
        }
    }
}
