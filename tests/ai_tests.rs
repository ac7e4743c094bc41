use animal_chess::core::ai::mobility;
use animal_chess::core::rules::{legal_moves, validate_move};
use animal_chess::{
    choose_move, choose_move_with_limits, evaluate, greedy_move, search, AiPlayer, Animal, Board,
    Difficulty, DifficultySettings, GameSession, Move, Piece, Player, SearchLimits, Side, WIN_SCORE,
};
use rand::{rngs::SmallRng, SeedableRng};

fn board_with(pieces: &[(Animal, Side, usize, usize)]) -> Board {
    let mut board = Board::empty();
    for &(animal, side, r, c) in pieces {
        board.place(r, c, Piece::new(animal, side)).unwrap();
    }
    board
}

#[test]
fn takes_the_den_when_it_can() {
    let board = board_with(&[
        (Animal::Dog, Side::First, 8, 2),
        (Animal::Cat, Side::First, 1, 1),
        (Animal::Lion, Side::Second, 2, 5),
        (Animal::Rat, Side::Second, 4, 3),
    ]);
    for difficulty in [Difficulty::Medium, Difficulty::Hard] {
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            assert_eq!(
                choose_move(&board, Side::First, difficulty, &mut rng),
                Some(Move::new(8, 2, 8, 3)),
                "{} seed {}",
                difficulty,
                seed
            );
        }
    }
}

#[test]
fn captures_last_enemy_piece() {
    let board = board_with(&[
        (Animal::Lion, Side::First, 4, 3),
        (Animal::Cat, Side::First, 0, 0),
        (Animal::Dog, Side::Second, 5, 3),
    ]);
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        choose_move(&board, Side::First, Difficulty::Medium, &mut rng),
        Some(Move::new(4, 3, 5, 3))
    );
}

#[test]
fn no_move_when_stalemated() {
    let board = board_with(&[
        (Animal::Rat, Side::Second, 8, 0),
        (Animal::Cat, Side::First, 7, 0),
        (Animal::Cat, Side::First, 8, 1),
    ]);
    let mut rng = SmallRng::seed_from_u64(1);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert_eq!(choose_move(&board, Side::Second, difficulty, &mut rng), None);
    }
    assert_eq!(greedy_move(&board, Side::Second, &mut rng), None);
}

#[test]
fn every_difficulty_plays_legal_moves() {
    let board = Board::new();
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut rng = SmallRng::seed_from_u64(42);
        let mv = choose_move(&board, Side::First, difficulty, &mut rng).unwrap();
        assert!(validate_move(&board, Side::First, mv).is_ok(), "{} played {}", difficulty, mv);
    }
}

#[test]
fn same_seed_same_move() {
    let board = Board::new();
    let mut a = SmallRng::seed_from_u64(99);
    let mut b = SmallRng::seed_from_u64(99);
    assert_eq!(
        choose_move(&board, Side::Second, Difficulty::Medium, &mut a),
        choose_move(&board, Side::Second, Difficulty::Medium, &mut b)
    );
}

#[test]
fn exhausted_budget_falls_back_to_greedy() {
    let board = Board::new();
    let mut rng = SmallRng::seed_from_u64(3);
    let result = search(
        &board,
        Side::First,
        Difficulty::Hard.settings(),
        SearchLimits { max_nodes: Some(1) },
        &mut rng,
    )
    .unwrap();
    assert!(!result.completed);

    let limits = SearchLimits { max_nodes: Some(1) };
    let mv = choose_move_with_limits(&board, Side::First, Difficulty::Hard, limits, &mut rng).unwrap();
    assert!(legal_moves(&board, Side::First).contains(&mv));
}

#[test]
fn unbounded_search_completes() {
    let board = Board::new();
    let mut rng = SmallRng::seed_from_u64(5);
    let result = search(
        &board,
        Side::First,
        Difficulty::Medium.settings(),
        SearchLimits::default(),
        &mut rng,
    )
    .unwrap();
    assert!(result.completed);
    assert!(result.nodes > 0);
    assert!(result.best.is_some());
}

#[test]
fn trading_the_last_pieces_is_a_win_for_the_mover() {
    let board = board_with(&[
        (Animal::Wolf, Side::First, 4, 0),
        (Animal::Wolf, Side::Second, 5, 0),
    ]);
    for jitter in [0, 500] {
        let mut rng = SmallRng::seed_from_u64(11);
        let result = search(
            &board,
            Side::First,
            DifficultySettings { depth: 1, jitter },
            SearchLimits::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.best, Some(Move::new(4, 0, 5, 0)));
        assert_eq!(result.score, WIN_SCORE + 1);
    }
}

#[test]
fn root_score_stays_within_leaf_noise() {
    let board = Board::new();
    let settings = DifficultySettings { depth: 3, jitter: 0 };
    let mut rng = SmallRng::seed_from_u64(1);
    let exact = search(&board, Side::First, settings, SearchLimits::default(), &mut rng)
        .unwrap()
        .score;
    for seed in 0..5 {
        let noisy = search(
            &board,
            Side::First,
            DifficultySettings { jitter: 7, ..settings },
            SearchLimits::default(),
            &mut SmallRng::seed_from_u64(seed),
        )
        .unwrap()
        .score;
        assert!((noisy - exact).abs() <= 7, "seed {}: {} vs {}", seed, noisy, exact);
    }
}

#[test]
fn evaluation_is_symmetric_at_start() {
    let board = Board::new();
    assert_eq!(evaluate(&board, Side::First), evaluate(&board, Side::Second));
    assert_eq!(mobility(&board, Side::First), 24);
}

#[test]
fn decided_positions_score_as_wins() {
    let board = board_with(&[
        (Animal::Dog, Side::First, 8, 3),
        (Animal::Lion, Side::Second, 4, 3),
    ]);
    assert_eq!(evaluate(&board, Side::First), WIN_SCORE);
    assert_eq!(evaluate(&board, Side::Second), -WIN_SCORE);
}

#[test]
fn material_counts_in_evaluation() {
    let full = Board::new();
    let mut missing = full;
    missing.take(8, 6).unwrap();
    assert!(evaluate(&missing, Side::First) > evaluate(&full, Side::First));
}

#[test]
fn difficulty_parsing() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert!("brutal".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::default(), Difficulty::Medium);
    assert_eq!(Difficulty::Medium.to_string(), "medium");
    assert!(Difficulty::Hard.settings().depth > Difficulty::Easy.settings().depth);
}

#[test]
fn ai_player_moves_for_the_side_to_move() {
    let mut session = GameSession::new();
    session.commit_move(Move::new(2, 0, 3, 0)).unwrap();
    let mut player = AiPlayer::new(Difficulty::Medium).with_node_budget(50_000);
    let mut rng = SmallRng::seed_from_u64(11);
    let mv = player.select_move(&mut rng, &session.snapshot()).unwrap();
    assert!(session.commit_move(mv).is_ok());
    assert_eq!(session.current_player(), Side::First);
}
