//! A set of grid cells packed into a `u128`, one bit per cell.
//!
//! The type is `no_std` friendly and avoids heap allocations. Membership,
//! insertion and removal are single bit operations; iteration walks the
//! grid in row-major order.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign};

use crate::common::Cell;
use crate::config::{CELL_COUNT, GRID_SIZE};

/// Cell membership over the fixed grid.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct CellSet {
    bits: u128,
}

impl CellSet {
    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        CellSet { bits: 0 }
    }

    #[inline]
    pub fn insert(&mut self, cell: Cell) {
        self.bits |= 1u128 << cell.index();
    }

    #[inline]
    pub fn remove(&mut self, cell: Cell) {
        self.bits &= !(1u128 << cell.index());
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (self.bits >> cell.index()) & 1 != 0
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterator over the set's cells in row-major order.
    #[inline]
    pub fn iter(&self) -> Cells {
        Cells {
            bits: self.bits,
            idx: 0,
        }
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellSet ({} cells):", self.len())?;
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let idx = row as usize * GRID_SIZE as usize + col as usize;
                let bit = if (self.bits >> idx) & 1 != 0 {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Union of two sets.
impl BitOr for CellSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CellSet {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Intersection of two sets.
impl BitAnd for CellSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        CellSet {
            bits: self.bits & rhs.bits,
        }
    }
}

/// Difference: cells in `self` but not in `rhs`.
impl Sub for CellSet {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        CellSet {
            bits: self.bits & !rhs.bits,
        }
    }
}

impl BitOrAssign for CellSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl BitAndAssign for CellSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl SubAssign for CellSet {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.bits &= !rhs.bits;
    }
}

/// Iterator over a set's cells in row-major order.
#[derive(Clone, Copy)]
pub struct Cells {
    bits: u128,
    idx: usize,
}

impl Iterator for Cells {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        while self.idx < CELL_COUNT {
            let idx = self.idx;
            self.idx += 1;
            if (self.bits >> idx) & 1 != 0 {
                return Some(Cell::from_index(idx));
            }
        }
        None
    }
}
