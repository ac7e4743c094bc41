#![cfg(feature = "std")]

use rand::rngs::SmallRng;

use crate::{
    core::{GameSession, Move, Phase, Side, WinReason},
    player::Player,
    protocol::{Message, PROTOCOL_VERSION},
    transport::Transport,
};

/// Plays one game against a remote peer: the local [`Player`] proposes moves,
/// the local [`GameSession`] adjudicates every move from either side.
pub struct PlayerNode {
    player: Box<dyn Player>,
    session: GameSession,
    transport: Box<dyn Transport>,
    side: Side,
    max_plies: Option<usize>,
}

impl PlayerNode {
    pub fn new(player: Box<dyn Player>, session: GameSession, transport: Box<dyn Transport>) -> Self {
        Self {
            player,
            session,
            transport,
            side: Side::First,
            max_plies: None,
        }
    }

    /// Stop after `plies` moves without a winner. Both peers must use the
    /// same cap, since each decides independently from its own history.
    pub fn with_max_plies(mut self, plies: usize) -> Self {
        self.max_plies = Some(plies);
        self
    }

    fn ply_cap_reached(&self) -> bool {
        self.max_plies
            .is_some_and(|cap| self.session.history().len() >= cap)
    }

    /// Perform handshake to establish protocol version.
    async fn handshake(&mut self, initiator: bool) -> anyhow::Result<()> {
        if initiator {
            self.transport
                .send(Message::Handshake {
                    version: PROTOCOL_VERSION,
                })
                .await?;
            match self.transport.recv().await? {
                Message::HandshakeAck { version } if version == PROTOCOL_VERSION => Ok(()),
                Message::HandshakeAck { version } => {
                    log::error!(
                        "handshake version mismatch: expected {}, peer responded with {}",
                        PROTOCOL_VERSION,
                        version
                    );
                    Err(anyhow::anyhow!(
                        "Protocol version mismatch in HandshakeAck: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ))
                }
                other => {
                    log::error!("expected HandshakeAck, got {:?}", other);
                    Err(anyhow::anyhow!("Expected HandshakeAck, got unexpected message (closing session)"))
                }
            }
        } else {
            match self.transport.recv().await? {
                Message::Handshake { version } if version == PROTOCOL_VERSION => {
                    self.transport
                        .send(Message::HandshakeAck {
                            version: PROTOCOL_VERSION,
                        })
                        .await?;
                    Ok(())
                }
                Message::Handshake { version } => {
                    log::error!(
                        "handshake version mismatch: expected {}, peer sent {}",
                        PROTOCOL_VERSION,
                        version
                    );
                    Err(anyhow::anyhow!(
                        "Protocol version mismatch in Handshake: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ))
                }
                other => {
                    log::error!("expected Handshake, got {:?}", other);
                    Err(anyhow::anyhow!("Expected Handshake, got unexpected message (closing session)"))
                }
            }
        }
    }

    /// Run the game to completion. The initiator plays [`Side::First`].
    pub async fn run(&mut self, rng: &mut SmallRng, initiator: bool) -> anyhow::Result<()> {
        self.handshake(initiator).await?;
        self.side = if initiator { Side::First } else { Side::Second };

        let mut my_seq: u64 = 0;
        let mut expected_recv_seq: u64 = 0;
        while self.session.phase() == Phase::Playing {
            if self.ply_cap_reached() {
                log::info!("stopping after {} plies without a winner", self.ply_count());
                return Ok(());
            }
            if self.session.current_player() == self.side {
                self.play_local_move(rng, my_seq).await?;
                my_seq += 1;
            } else {
                self.receive_remote_move(expected_recv_seq).await?;
                expected_recv_seq += 1;
            }
        }

        if let Some((winner, reason)) = self.session.winner() {
            let mover = self.session.history().last().map(|r| r.side);
            if mover == Some(self.side) {
                self.transport
                    .send(Message::GameOver {
                        version: PROTOCOL_VERSION,
                        winner,
                        reason,
                    })
                    .await?;
            } else {
                self.confirm_game_over(winner, reason).await?;
            }
        }
        Ok(())
    }

    async fn play_local_move(&mut self, rng: &mut SmallRng, seq: u64) -> anyhow::Result<()> {
        loop {
            let snapshot = self.session.snapshot();
            let token = snapshot.turn_token();
            let mv = self
                .player
                .select_move(rng, &snapshot)
                .ok_or_else(|| anyhow::anyhow!("{} has no move to play", self.side))?;
            match self.session.commit_if_current(token, mv) {
                Ok(outcome) => {
                    self.player.handle_move_result(mv, &outcome);
                    self.transport.send(Message::from_move(seq, mv)).await?;
                    return Ok(());
                }
                Err(e) => {
                    log::warn!("local move {} rejected: {}", mv, e);
                    self.player.handle_rejected_move(mv, e);
                }
            }
        }
    }

    async fn receive_remote_move(&mut self, expected_seq: u64) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Move {
                version,
                seq,
                from,
                to,
            } => {
                if version != PROTOCOL_VERSION {
                    log::error!("protocol version mismatch in Move: expected {}, got {}", PROTOCOL_VERSION, version);
                    return Err(anyhow::anyhow!(
                        "Protocol version mismatch in Move: expected {}, got {}",
                        PROTOCOL_VERSION,
                        version
                    ));
                }
                if seq != expected_seq {
                    log::error!("out-of-order Move: expected seq {}, got {}", expected_seq, seq);
                    return Err(anyhow::anyhow!(
                        "Out-of-order Move: expected seq {}, got {}",
                        expected_seq,
                        seq
                    ));
                }
                let mv = Move::new(from.0 as usize, from.1 as usize, to.0 as usize, to.1 as usize);
                let outcome = self.session.commit_move(mv).map_err(|e| {
                    log::error!("peer sent illegal move {}: {}", mv, e);
                    anyhow::anyhow!("Peer sent illegal move {}: {}", mv, e)
                })?;
                self.player.handle_opponent_move(mv, &outcome);
                Ok(())
            }
            other => {
                log::error!("expected Move, got {:?} (expected seq {})", other, expected_seq);
                Err(anyhow::anyhow!("Expected Move message, got unexpected message type (closing session)"))
            }
        }
    }

    async fn confirm_game_over(&mut self, winner: Side, reason: WinReason) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::GameOver {
                winner: peer_winner,
                reason: peer_reason,
                ..
            } if peer_winner == winner && peer_reason == reason => Ok(()),
            Message::GameOver {
                winner: peer_winner,
                reason: peer_reason,
                ..
            } => Err(anyhow::anyhow!(
                "Peer reports {} winning ({}), local session says {} ({})",
                peer_winner,
                peer_reason,
                winner,
                reason
            )),
            other => Err(anyhow::anyhow!("Expected GameOver, got {:?}", other)),
        }
    }

    /// Local session state.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Side this node plays; meaningful once `run` has started.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Winner of the finished game, if any.
    pub fn winner(&self) -> Option<(Side, WinReason)> {
        self.session.winner()
    }

    /// Number of moves committed by both sides.
    pub fn ply_count(&self) -> usize {
        self.session.history().len()
    }
}
