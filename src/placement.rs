//! Placement legality and the two commit paths, manual and random.
//!
//! A placement is a directed straight run of cells. Enumeration scans
//! origins in row-major order and directions in [`Direction::ALL`] order,
//! so its output order is deterministic for a given board state.

use alloc::vec::Vec;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::{Board, IdAllocator, ShipId};
use crate::cellset::CellSet;
use crate::common::{Cell, GameError};

/// The four directed orientations a run can take from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Columns increasing.
    Right,
    /// Rows increasing.
    Down,
    /// Columns decreasing.
    Left,
    /// Rows decreasing.
    Up,
}

impl Direction {
    /// Scan order for enumeration.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Per-step `(drow, dcol)` delta.
    pub fn step(self) -> (i8, i8) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// The directed run of `size` cells starting at `origin`, or `None` when
/// it would leave the grid.
pub fn line(origin: Cell, direction: Direction, size: u8) -> Option<Vec<Cell>> {
    let (drow, dcol) = direction.step();
    let mut cells = Vec::with_capacity(size as usize);
    let mut cursor = origin;
    cells.push(cursor);
    for _ in 1..size {
        cursor = cursor.offset(drow, dcol)?;
        cells.push(cursor);
    }
    Some(cells)
}

/// A run is legal when no cell is occupied by a live ship or blocked by a
/// recorded miss. Bounds need no check: cells only exist in bounds.
pub fn is_legal(board: &Board, cells: &[Cell]) -> bool {
    cells
        .iter()
        .all(|&cell| !board.taken().contains(cell) && !board.blocked().contains(cell))
}

/// Every legal run of `size` on the board.
///
/// Reversed duplicates are kept: a run and its mirror count separately,
/// so an empty board has 240 runs of size 5.
pub fn enumerate(board: &Board, size: u8) -> Vec<Vec<Cell>> {
    let mut runs = Vec::new();
    for origin in Cell::all() {
        for direction in Direction::ALL {
            if let Some(cells) = line(origin, direction, size) {
                if is_legal(board, &cells) {
                    runs.push(cells);
                }
            }
        }
    }
    runs
}

/// True when at least one legal run of `size` exists. Stops at the first
/// find and leaves the board untouched.
pub fn is_placeable(board: &Board, size: u8) -> bool {
    Cell::all().any(|origin| {
        Direction::ALL.into_iter().any(|direction| {
            line(origin, direction, size).map_or(false, |cells| is_legal(board, &cells))
        })
    })
}

fn is_straight_run(cells: &[Cell]) -> bool {
    if cells.len() < 2 {
        return cells.len() == 1;
    }
    let drow = cells[1].row() as i16 - cells[0].row() as i16;
    let dcol = cells[1].col() as i16 - cells[0].col() as i16;
    if !matches!((drow, dcol), (0, 1) | (0, -1) | (1, 0) | (-1, 0)) {
        return false;
    }
    cells.windows(2).all(|pair| {
        pair[1].row() as i16 - pair[0].row() as i16 == drow
            && pair[1].col() as i16 - pair[0].col() as i16 == dcol
    })
}

/// Manual placement: validate shape and legality, then commit atomically.
///
/// The cells must be a straight contiguous run of exactly `size` cells,
/// clear of live ships and blocked water. Nothing is written on failure.
pub fn place(
    board: &mut Board,
    ids: &mut IdAllocator,
    size: u8,
    cells: &[Cell],
) -> Result<ShipId, GameError> {
    if cells.len() != size as usize {
        return Err(GameError::WrongLength {
            expected: size,
            got: cells.len(),
        });
    }
    if !is_straight_run(cells) {
        return Err(GameError::NotInLine);
    }
    for &cell in cells {
        if board.taken().contains(cell) {
            return Err(GameError::Overlap);
        }
        if board.blocked().contains(cell) {
            return Err(GameError::Blocked);
        }
    }
    let footprint: CellSet = cells.iter().copied().collect();
    let id = ids.allocate();
    board.commit(id, size, footprint);
    Ok(id)
}

/// Random placement, uniform over every legal run.
///
/// When no run exists the hull goes back to the end of the board's
/// placement line and `None` is returned.
pub fn auto_place<R: Rng>(
    board: &mut Board,
    ids: &mut IdAllocator,
    size: u8,
    rng: &mut R,
) -> Option<ShipId> {
    let runs = enumerate(board, size);
    match runs.choose(rng) {
        Some(cells) => {
            let footprint: CellSet = cells.iter().copied().collect();
            let id = ids.allocate();
            board.commit(id, size, footprint);
            Some(id)
        }
        None => {
            log::debug!("no berth for a size-{} hull, requeued", size);
            board.enqueue(size);
            None
        }
    }
}
