//! Common types for Animal Chess: sides, animals, terrain, moves and errors.

use core::fmt;

/// One of the two players. `First` moves first and defends the den on row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// The other player.
    pub const fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Index into per-side tables.
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// The eight animal kinds, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Animal {
    Rat,
    Cat,
    Dog,
    Wolf,
    Leopard,
    Tiger,
    Lion,
    Elephant,
}

impl Animal {
    pub const ALL: [Animal; 8] = [
        Animal::Rat,
        Animal::Cat,
        Animal::Dog,
        Animal::Wolf,
        Animal::Leopard,
        Animal::Tiger,
        Animal::Lion,
        Animal::Elephant,
    ];

    /// Fixed rank of the animal, 1 (rat) to 8 (elephant).
    pub const fn power(self) -> u8 {
        match self {
            Animal::Rat => 1,
            Animal::Cat => 2,
            Animal::Dog => 3,
            Animal::Wolf => 4,
            Animal::Leopard => 5,
            Animal::Tiger => 6,
            Animal::Lion => 7,
            Animal::Elephant => 8,
        }
    }

    /// Lions and tigers may leap across the river.
    pub const fn can_leap(self) -> bool {
        matches!(self, Animal::Lion | Animal::Tiger)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Animal::Rat => "rat",
            Animal::Cat => "cat",
            Animal::Dog => "dog",
            Animal::Wolf => "wolf",
            Animal::Leopard => "leopard",
            Animal::Tiger => "tiger",
            Animal::Lion => "lion",
            Animal::Elephant => "elephant",
        }
    }

    /// Single-letter symbol used by text renderers.
    pub const fn symbol(self) -> char {
        match self {
            Animal::Rat => 'R',
            Animal::Cat => 'C',
            Animal::Dog => 'D',
            Animal::Wolf => 'W',
            Animal::Leopard => 'P',
            Animal::Tiger => 'T',
            Animal::Lion => 'L',
            Animal::Elephant => 'E',
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static terrain of a cell. Traps and dens belong to the side whose home
/// territory they sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Normal,
    River,
    Trap(Side),
    Den(Side),
}

impl Terrain {
    pub const fn is_river(self) -> bool {
        matches!(self, Terrain::River)
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub animal: Animal,
    pub owner: Side,
}

impl Piece {
    pub const fn new(animal: Animal, owner: Side) -> Self {
        Self { animal, owner }
    }

    pub const fn power(self) -> u8 {
        self.animal.power()
    }
}

/// A move from one cell to another, as `(row, col)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
}

impl Move {
    pub const fn new(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Self {
            from: (from_row, from_col),
            to: (to_row, to_col),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum WinReason {
    /// A piece walked into the opponent's den.
    ReachedDen,
    /// The opponent has no pieces left on the board.
    CapturedAll,
    /// The opponent is to move but has no legal move.
    NoLegalMoves,
}

impl WinReason {
    /// Human-readable reason carried by game-over notifications.
    pub const fn description(self) -> &'static str {
        match self {
            WinReason::ReachedDen => "reached enemy den",
            WinReason::CapturedAll => "captured all enemy pieces",
            WinReason::NoLegalMoves => "opponent has no legal moves",
        }
    }
}

impl fmt::Display for WinReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Reasons a proposed move is rejected. A rejected move never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A coordinate lies outside the 9×7 board.
    OutOfBounds,
    /// The origin cell is empty.
    NoPiece,
    /// The origin piece belongs to the other player.
    NotYourPiece,
    /// The game has already finished.
    GameOver,
    /// Destination is neither adjacent nor a reachable leap landing.
    Unreachable,
    /// Destination holds one of the mover's own pieces.
    OwnPiece,
    /// Only the rat may enter the river.
    RiverForbidden,
    /// Pieces may not enter their own den.
    OwnDen,
    /// The defender outranks the attacker on this terrain.
    CannotCapture,
    /// The move was computed against a session state that no longer exists.
    StaleTurn,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "Coordinate is outside the board"),
            MoveError::NoPiece => write!(f, "No piece on the origin cell"),
            MoveError::NotYourPiece => write!(f, "Piece belongs to the other player"),
            MoveError::GameOver => write!(f, "Game is already finished"),
            MoveError::Unreachable => write!(f, "Destination cannot be reached in one move"),
            MoveError::OwnPiece => write!(f, "Destination is occupied by an own piece"),
            MoveError::RiverForbidden => write!(f, "Only the rat may enter the river"),
            MoveError::OwnDen => write!(f, "A piece may not enter its own den"),
            MoveError::CannotCapture => write!(f, "Defender cannot be captured"),
            MoveError::StaleTurn => write!(f, "Move refers to an outdated game state"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MoveError {}
