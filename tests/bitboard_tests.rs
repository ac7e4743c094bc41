use animal_chess::{BitBoard, BitBoardError, CellSet};

#[test]
fn set_and_iterate_cells() {
    let mut set = CellSet::new();
    assert!(set.is_empty());
    set.set(8, 6).unwrap();
    set.set(0, 0).unwrap();
    set.set(4, 3).unwrap();
    set.set(4, 3).unwrap();
    assert_eq!(set.count_ones(), 3);
    assert!(set.contains(4, 3));
    assert!(!set.contains(4, 4));
    let cells: Vec<_> = set.iter_set_bits().collect();
    assert_eq!(cells, vec![(0, 0), (4, 3), (8, 6)]);
}

#[test]
fn off_board_cells_are_rejected() {
    let mut set = CellSet::new();
    assert_eq!(set.set(9, 0), Err(BitBoardError { row: 9, col: 0 }));
    assert_eq!(set.set(0, 7), Err(BitBoardError { row: 0, col: 7 }));
    assert!(set.is_empty());
    assert!(!set.contains(20, 20));
    assert!(!set.contains(0, 7));
}

#[test]
fn fits_exactly_sized_storage() {
    let mut set = BitBoard::<u16, 4, 4>::new();
    set.set(3, 3).unwrap();
    set.set(0, 0).unwrap();
    assert_eq!(set.iter_set_bits().collect::<Vec<_>>(), vec![(0, 0), (3, 3)]);
    assert_eq!(format!("{:?}", set), "{(0, 0), (3, 3)}");
}
