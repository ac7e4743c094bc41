//! Set of board cells packed row-major into one unsigned integer.
//!
//! Holds the legal destinations of a piece. Copyable and allocation free, so
//! the search can build one per node.

use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned};

/// Cell outside the `R×C` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitBoardError {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell ({}, {}) is off the board", self.row, self.col)
    }
}

/// `R×C` cell set stored in `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T: PrimInt + Unsigned, const R: usize, const C: usize> {
    bits: T,
}

impl<T: PrimInt + Unsigned, const R: usize, const C: usize> BitBoard<T, R, C> {
    /// Rejects at compile time a grid that does not fit in `T`.
    const FITS: () = assert!(R * C <= mem::size_of::<T>() * 8, "grid does not fit the storage type");

    pub fn new() -> Self {
        let () = Self::FITS;
        Self { bits: T::zero() }
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether (row, col) is in the set. Cells off the grid never are.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < R && col < C && !(self.bits & (T::one() << (row * C + col))).is_zero()
    }

    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        if row >= R || col >= C {
            return Err(BitBoardError { row, col });
        }
        self.bits = self.bits | (T::one() << (row * C + col));
        Ok(())
    }

    /// Cells in the set, row-major.
    pub fn iter_set_bits(&self) -> SetBits<T, R, C> {
        SetBits { bits: self.bits }
    }
}

impl<T: PrimInt + Unsigned, const R: usize, const C: usize> Default for BitBoard<T, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PrimInt + Unsigned, const R: usize, const C: usize> fmt::Debug for BitBoard<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_set_bits()).finish()
    }
}

/// Drains a copy of the bits, lowest index first.
#[derive(Clone, Copy)]
pub struct SetBits<T: PrimInt + Unsigned, const R: usize, const C: usize> {
    bits: T,
}

impl<T: PrimInt + Unsigned, const R: usize, const C: usize> Iterator for SetBits<T, R, C> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits.is_zero() {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        self.bits = self.bits & (self.bits - T::one());
        Some((idx / C, idx % C))
    }
}
