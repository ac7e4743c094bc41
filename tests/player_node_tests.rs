use animal_chess::transport::{in_memory::InMemoryTransport, Transport};
use animal_chess::{
    AiPlayer, Animal, Board, Difficulty, GameSession, GameSnapshot, Message, Move, Phase, Piece,
    Player, PlayerNode, Side, WinReason, PROTOCOL_VERSION,
};
use rand::{rngs::SmallRng, SeedableRng};

/// Plays a fixed list of moves, then gives up.
struct ScriptedPlayer {
    moves: Vec<Move>,
}

impl ScriptedPlayer {
    fn new(mut moves: Vec<Move>) -> Self {
        moves.reverse();
        Self { moves }
    }
}

impl Player for ScriptedPlayer {
    fn select_move(&mut self, _rng: &mut SmallRng, _game: &GameSnapshot) -> Option<Move> {
        self.moves.pop()
    }
}

fn near_win_board() -> Board {
    let mut board = Board::empty();
    board.place(8, 2, Piece::new(Animal::Dog, Side::First)).unwrap();
    board.place(4, 3, Piece::new(Animal::Lion, Side::Second)).unwrap();
    board
}

#[tokio::test]
async fn ai_nodes_agree_on_result() -> anyhow::Result<()> {
    let (t1, t2) = InMemoryTransport::pair();
    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);

    let f1 = async move {
        let mut node = PlayerNode::new(Box::new(AiPlayer::new(Difficulty::Easy)), GameSession::new(), Box::new(t1))
            .with_max_plies(80);
        node.run(&mut rng1, true).await?;
        Ok::<_, anyhow::Error>((node.winner(), node.ply_count(), *node.session().board(), node.side()))
    };
    let f2 = async move {
        let mut node = PlayerNode::new(Box::new(AiPlayer::new(Difficulty::Easy)), GameSession::new(), Box::new(t2))
            .with_max_plies(80);
        node.run(&mut rng2, false).await?;
        Ok::<_, anyhow::Error>((node.winner(), node.ply_count(), *node.session().board(), node.side()))
    };

    let (a, b) = tokio::try_join!(f1, f2)?;
    assert_eq!(a.0, b.0);
    assert_eq!(a.1, b.1);
    assert_eq!(a.2, b.2);
    assert_eq!(a.3, Side::First);
    assert_eq!(b.3, Side::Second);
    assert!(a.1 <= 80);
    Ok(())
}

#[tokio::test]
async fn winning_move_is_followed_by_game_over() -> anyhow::Result<()> {
    let (t1, t2) = InMemoryTransport::pair();
    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);

    let f1 = async move {
        let player = ScriptedPlayer::new(vec![Move::new(8, 2, 8, 3)]);
        let session = GameSession::from_position(near_win_board(), Side::First);
        let mut node = PlayerNode::new(Box::new(player), session, Box::new(t1));
        node.run(&mut rng1, true).await?;
        Ok::<_, anyhow::Error>(node.winner())
    };
    let f2 = async move {
        let player = ScriptedPlayer::new(vec![]);
        let session = GameSession::from_position(near_win_board(), Side::First);
        let mut node = PlayerNode::new(Box::new(player), session, Box::new(t2));
        node.run(&mut rng2, false).await?;
        Ok::<_, anyhow::Error>(node.winner())
    };

    let (a, b) = tokio::try_join!(f1, f2)?;
    assert_eq!(a, Some((Side::First, WinReason::ReachedDen)));
    assert_eq!(b, a);
    Ok(())
}

#[tokio::test]
async fn illegal_peer_move_is_rejected() -> anyhow::Result<()> {
    let (mut peer, t2) = InMemoryTransport::pair();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut node = PlayerNode::new(Box::new(ScriptedPlayer::new(vec![])), GameSession::new(), Box::new(t2));

    peer.send(Message::Handshake { version: PROTOCOL_VERSION }).await?;
    // Leopard into the river.
    peer.send(Message::from_move(0, Move::new(2, 2, 3, 2))).await?;

    let err = node.run(&mut rng, false).await.unwrap_err();
    assert!(err.to_string().contains("illegal"), "{}", err);
    assert_eq!(*node.session().board(), Board::new());
    assert!(matches!(peer.recv().await?, Message::HandshakeAck { .. }));
    Ok(())
}

#[tokio::test]
async fn out_of_order_move_is_rejected() -> anyhow::Result<()> {
    let (mut peer, t2) = InMemoryTransport::pair();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut node = PlayerNode::new(Box::new(ScriptedPlayer::new(vec![])), GameSession::new(), Box::new(t2));

    peer.send(Message::Handshake { version: PROTOCOL_VERSION }).await?;
    peer.send(Message::from_move(5, Move::new(2, 0, 3, 0))).await?;

    let err = node.run(&mut rng, false).await.unwrap_err();
    assert!(err.to_string().contains("Out-of-order"), "{}", err);
    assert!(node.session().history().is_empty());
    Ok(())
}

#[tokio::test]
async fn handshake_version_mismatch() -> anyhow::Result<()> {
    let (mut peer, t2) = InMemoryTransport::pair();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut node = PlayerNode::new(Box::new(ScriptedPlayer::new(vec![])), GameSession::new(), Box::new(t2));

    peer.send(Message::Handshake { version: PROTOCOL_VERSION + 1 }).await?;
    let err = node.run(&mut rng, false).await.unwrap_err();
    assert!(err.to_string().contains("version mismatch"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn local_player_without_move_ends_run() -> anyhow::Result<()> {
    let (t1, mut peer) = InMemoryTransport::pair();
    let mut rng = SmallRng::seed_from_u64(3);
    let mut node = PlayerNode::new(Box::new(ScriptedPlayer::new(vec![])), GameSession::new(), Box::new(t1));

    peer.send(Message::HandshakeAck { version: PROTOCOL_VERSION }).await?;
    assert!(node.run(&mut rng, true).await.is_err());
    assert!(matches!(peer.recv().await?, Message::Handshake { .. }));
    assert_eq!(node.session().phase(), Phase::Playing);
    Ok(())
}

#[tokio::test]
async fn rejected_local_move_is_retried() -> anyhow::Result<()> {
    let (t1, mut peer) = InMemoryTransport::pair();
    let mut rng = SmallRng::seed_from_u64(3);
    let player = ScriptedPlayer::new(vec![Move::new(2, 2, 3, 2), Move::new(2, 0, 3, 0)]);
    let mut node = PlayerNode::new(Box::new(player), GameSession::new(), Box::new(t1)).with_max_plies(1);

    peer.send(Message::HandshakeAck { version: PROTOCOL_VERSION }).await?;
    node.run(&mut rng, true).await?;
    assert!(matches!(peer.recv().await?, Message::Handshake { .. }));
    assert_eq!(peer.recv().await?, Message::from_move(0, Move::new(2, 0, 3, 0)));
    Ok(())
}
