use super::bitboard::BitBoard;
use super::common::{Animal, Side, Terrain};

pub const ROWS: usize = 9;
pub const COLS: usize = 7;

/// Set of board cells. 63 cells fit in a `u64`.
pub type CellSet = BitBoard<u64, ROWS, COLS>;

/// Terrain codes: 0 normal, 1 river, 2 trap, 3 den. Ownership of traps and
/// dens follows the half of the board they sit in.
const TERRAIN_LAYOUT: [[u8; COLS]; ROWS] = [
    [0, 0, 2, 3, 2, 0, 0],
    [0, 0, 0, 2, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 0, 1, 1, 0],
    [0, 1, 1, 0, 1, 1, 0],
    [0, 1, 1, 0, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 2, 0, 0, 0],
    [0, 0, 2, 3, 2, 0, 0],
];

/// Side whose home half contains `row`. The middle row belongs to nobody,
/// which never matters because it holds no trap or den.
const fn home_side(row: usize) -> Side {
    if row < ROWS / 2 {
        Side::First
    } else {
        Side::Second
    }
}

/// Fixed terrain of the cell at (row, col).
pub const fn terrain_at(row: usize, col: usize) -> Terrain {
    match TERRAIN_LAYOUT[row][col] {
        1 => Terrain::River,
        2 => Terrain::Trap(home_side(row)),
        3 => Terrain::Den(home_side(row)),
        _ => Terrain::Normal,
    }
}

/// Location of each side's den.
pub const fn den_of(side: Side) -> (usize, usize) {
    match side {
        Side::First => (0, 3),
        Side::Second => (ROWS - 1, 3),
    }
}

pub const PIECES_PER_SIDE: usize = 8;

/// Starting layout for `Side::First`; `Side::Second` is the 180° rotation.
pub const FIRST_START: [(Animal, usize, usize); PIECES_PER_SIDE] = [
    (Animal::Lion, 0, 0),
    (Animal::Tiger, 0, 6),
    (Animal::Dog, 1, 1),
    (Animal::Cat, 1, 5),
    (Animal::Rat, 2, 0),
    (Animal::Leopard, 2, 2),
    (Animal::Wolf, 2, 4),
    (Animal::Elephant, 2, 6),
];

/// Rotate a coordinate by 180° around the board centre.
pub const fn rotate(row: usize, col: usize) -> (usize, usize) {
    (ROWS - 1 - row, COLS - 1 - col)
}

/// Material value of each animal for evaluation (10 × power).
pub const fn piece_value(animal: Animal) -> i32 {
    10 * animal.power() as i32
}

pub const DEN_BONUS: i32 = 1000;
pub const TRAP_BONUS: i32 = 20;
pub const MATERIAL_WEIGHT: i32 = 100;
pub const MOBILITY_WEIGHT: i32 = 5;

/// Score of a decided position. Remaining search depth is added on top so
/// quicker wins are preferred.
pub const WIN_SCORE: i32 = 10_000;

/// Positional value of a cell for a piece owned by `owner`: rewards
/// approaching the enemy den, with fixed bonuses on dens and traps.
pub const fn positional_value(owner: Side, row: usize, col: usize) -> i32 {
    match terrain_at(row, col) {
        Terrain::Den(side) => {
            if side.index() == owner.index() {
                -DEN_BONUS
            } else {
                DEN_BONUS
            }
        }
        Terrain::Trap(side) => {
            if side.index() == owner.index() {
                TRAP_BONUS
            } else {
                -TRAP_BONUS
            }
        }
        _ => {
            let (den_row, den_col) = den_of(owner.opponent());
            let dist = row.abs_diff(den_row) + col.abs_diff(den_col);
            if dist >= 10 {
                0
            } else {
                10 - dist as i32
            }
        }
    }
}

/// Search depth and random jitter amplitude of a difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultySettings {
    pub depth: u32,
    pub jitter: i32,
}

pub const EASY: DifficultySettings = DifficultySettings { depth: 2, jitter: 15 };
pub const MEDIUM: DifficultySettings = DifficultySettings { depth: 3, jitter: 7 };
pub const HARD: DifficultySettings = DifficultySettings { depth: 4, jitter: 2 };
