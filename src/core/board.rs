//! Board state: static terrain plus the mutable piece grid.

use core::fmt;

use super::common::{MoveError, Piece, Side, Terrain};
use super::config::{rotate, terrain_at, COLS, FIRST_START, ROWS};

/// One board square: fixed terrain and at most one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: Terrain,
    pub piece: Option<Piece>,
}

/// The 9×7 grid of cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Board in the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for &(animal, row, col) in FIRST_START.iter() {
            board.cells[row][col].piece = Some(Piece::new(animal, Side::First));
            let (r, c) = rotate(row, col);
            board.cells[r][c].piece = Some(Piece::new(animal, Side::Second));
        }
        board
    }

    /// Board with terrain only and no pieces, for setting up positions.
    pub fn empty() -> Self {
        let cells = core::array::from_fn(|row| {
            core::array::from_fn(|col| Cell {
                terrain: terrain_at(row, col),
                piece: None,
            })
        });
        Board { cells }
    }

    #[inline]
    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < ROWS && col < COLS
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        self.cell(row, col).and_then(|c| c.piece)
    }

    pub fn terrain(&self, row: usize, col: usize) -> Option<Terrain> {
        self.cell(row, col).map(|c| c.terrain)
    }

    /// Put a piece on a cell, replacing whatever was there.
    pub fn place(&mut self, row: usize, col: usize, piece: Piece) -> Result<(), MoveError> {
        let cell = self.cell_mut(row, col)?;
        cell.piece = Some(piece);
        Ok(())
    }

    /// Remove and return the piece on a cell.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Option<Piece>, MoveError> {
        Ok(self.cell_mut(row, col)?.piece.take())
    }

    pub(crate) fn set_piece(&mut self, pos: (usize, usize), piece: Option<Piece>) {
        self.cells[pos.0][pos.1].piece = piece;
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, MoveError> {
        self.cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(MoveError::OutOfBounds)
    }

    /// All pieces of `side` with their coordinates, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = ((usize, usize), Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| match cell.piece {
                Some(p) if p.owner == side => Some(((r, c), p)),
                _ => None,
            })
        })
    }

    pub fn piece_count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_char(cell: &Cell) -> char {
    match cell.piece {
        Some(p) if p.owner == Side::First => p.animal.symbol(),
        Some(p) => p.animal.symbol().to_ascii_lowercase(),
        None => match cell.terrain {
            Terrain::Normal => '.',
            Terrain::River => '~',
            Terrain::Trap(_) => '#',
            Terrain::Den(_) => '@',
        },
    }
}

/// Text rendering: columns `a`-`g`, rows `1`-`9` (row index 0 on top). First
/// player's pieces are upper case, second player's lower case.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..COLS {
            write!(f, " {}", (b'a' + c as u8) as char)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{:2} ", r + 1)?;
            for cell in row.iter() {
                write!(f, " {}", cell_char(cell))?;
            }
            if r + 1 < ROWS {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        fmt::Display::fmt(self, f)?;
        write!(f, "\n}}")
    }
}
