use animal_chess::player::cli::{coord_to_string, parse_coord, parse_move};
use animal_chess::Move;

#[test]
fn parses_cells() {
    assert_eq!(parse_coord("a1"), Ok((0, 0)));
    assert_eq!(parse_coord("G9"), Ok((8, 6)));
    assert_eq!(parse_coord("d5"), Ok((4, 3)));
    assert!(parse_coord("h1").is_err());
    assert!(parse_coord("a0").is_err());
    assert!(parse_coord("a10").is_err());
    assert!(parse_coord("").is_err());
    assert!(parse_coord("11").is_err());
}

#[test]
fn parses_moves() {
    assert_eq!(parse_move("a3 a4"), Ok(Move::new(2, 0, 3, 0)));
    assert_eq!(parse_move("a3a4"), Ok(Move::new(2, 0, 3, 0)));
    assert_eq!(parse_move("  c7   c6 "), Ok(Move::new(6, 2, 5, 2)));
    assert!(parse_move("a3").is_err());
    assert!(parse_move("a3 a4 a5").is_err());
}

#[test]
fn cell_names_round_trip() {
    assert_eq!(coord_to_string(0, 0), "a1");
    assert_eq!(coord_to_string(8, 6), "g9");
    assert_eq!(parse_coord(&coord_to_string(5, 2)), Ok((5, 2)));
}
