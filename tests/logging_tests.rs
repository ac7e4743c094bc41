use animal_chess::{init_logging, GameSession, Move};

#[test]
fn logging_can_be_initialised_twice() {
    init_logging();
    init_logging();
    let mut session = GameSession::new();
    session.commit_move(Move::new(2, 0, 3, 0)).unwrap();
    assert!(session.commit_move(Move::new(3, 0, 4, 0)).is_err());
}
