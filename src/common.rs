//! Core vocabulary: grid cells, shot outcomes, engine errors.

use crate::config::GRID_SIZE;

/// Orthogonal neighbour deltas in up, down, left, right order.
const NEIGHBOR_DELTAS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A grid position. Values are in bounds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Build a cell, refusing coordinates off the grid.
    pub fn new(row: u8, col: u8) -> Option<Cell> {
        if row < GRID_SIZE && col < GRID_SIZE {
            Some(Cell { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Row-major bit index used by `CellSet`.
    pub(crate) fn index(self) -> usize {
        self.row as usize * GRID_SIZE as usize + self.col as usize
    }

    pub(crate) fn from_index(index: usize) -> Cell {
        Cell {
            row: (index / GRID_SIZE as usize) as u8,
            col: (index % GRID_SIZE as usize) as u8,
        }
    }

    /// The cell displaced by `(drow, dcol)`, if it stays on the grid.
    pub fn offset(self, drow: i8, dcol: i8) -> Option<Cell> {
        let row = self.row as i16 + drow as i16;
        let col = self.col as i16 + dcol as i16;
        if (0..GRID_SIZE as i16).contains(&row) && (0..GRID_SIZE as i16).contains(&col) {
            Some(Cell {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// In-bounds orthogonal neighbours in up, down, left, right order.
    pub fn neighbors(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_DELTAS
            .into_iter()
            .filter_map(move |(drow, dcol)| self.offset(drow, dcol))
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Cell { row, col }))
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Result of a resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Open water. The cell is blocked for future placements on the
    /// defending board.
    Miss,
    /// Struck a ship that still floats.
    Hit,
    /// Finished off a ship, carrying its size.
    Sunk(u8),
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Placement does not use the requested number of cells.
    WrongLength { expected: u8, got: usize },
    /// Placement cells do not form a straight contiguous run.
    NotInLine,
    /// Placement overlaps a ship that is still afloat.
    Overlap,
    /// Placement covers a cell where a shot already missed.
    Blocked,
    /// Shot at a cell whose outcome is already on the books.
    RepeatShot,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::WrongLength { expected, got } => {
                write!(f, "placement needs {} cells, got {}", expected, got)
            }
            GameError::NotInLine => write!(f, "placement cells are not a straight run"),
            GameError::Overlap => write!(f, "placement overlaps a live ship"),
            GameError::Blocked => write!(f, "placement covers a blocked cell"),
            GameError::RepeatShot => write!(f, "cell was already shot at"),
        }
    }
}
