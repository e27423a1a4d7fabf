//! One side's board: live ships, shot scars, and the queue of hulls
//! waiting for a berth.

use alloc::collections::{BTreeMap, VecDeque};
use core::fmt;

use crate::cellset::CellSet;
use crate::common::Cell;
use crate::config::{GRID_SIZE, INITIAL_FLEET};

/// Arena-style ship identifier, unique for the life of a match.
pub type ShipId = u32;

/// Hands out ship ids, never reusing one.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: ShipId,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 0 }
    }

    /// Returns the current id and advances the counter.
    pub fn allocate(&mut self) -> ShipId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Move the counter past `id` so it is never handed out again.
    pub(crate) fn resume_past(&mut self, id: ShipId) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

/// A ship still afloat: its footprint and the cells already struck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRecord {
    size: u8,
    cells: CellSet,
    hits: CellSet,
}

impl ShipRecord {
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Full footprint of the ship.
    pub fn cells(&self) -> CellSet {
        self.cells
    }

    /// Footprint cells that have been struck.
    pub fn hits(&self) -> CellSet {
        self.hits
    }

    /// Footprint cells not yet struck.
    pub fn unhit(&self) -> CellSet {
        self.cells - self.hits
    }
}

/// What a shot did to this board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Impact {
    Miss,
    Hit { ship: ShipId },
    Sunk { ship: ShipId, size: u8, cells: CellSet },
}

/// Defensive state for one side.
///
/// The board records everything done *to* this side: ship placements,
/// incoming misses (which permanently block future placements), incoming
/// hits, and the queue of hull sizes waiting for a spot. All mutation
/// flows through the placement routines and [`receive_shot`].
///
/// [`receive_shot`]: Board::receive_shot
#[derive(Clone)]
pub struct Board {
    ships: BTreeMap<ShipId, ShipRecord>,
    taken: CellSet,
    blocked: CellSet,
    struck: CellSet,
    pending: VecDeque<u8>,
    sizes: [[u8; GRID_SIZE as usize]; GRID_SIZE as usize],
}

impl Board {
    /// Empty board with the standard fleet queued for placement,
    /// smallest hull first.
    pub fn new() -> Self {
        Board {
            ships: BTreeMap::new(),
            taken: CellSet::new(),
            blocked: CellSet::new(),
            struck: CellSet::new(),
            pending: VecDeque::from(INITIAL_FLEET),
            sizes: [[0; GRID_SIZE as usize]; GRID_SIZE as usize],
        }
    }

    /// Sum of the sizes of ships still afloat.
    pub fn score(&self) -> u32 {
        self.ships.values().map(|rec| rec.size() as u32).sum()
    }

    pub fn has_live_ships(&self) -> bool {
        !self.ships.is_empty()
    }

    /// Size of the smallest ship still afloat.
    pub fn smallest_live_ship(&self) -> Option<u8> {
        self.ships.values().map(ShipRecord::size).min()
    }

    /// Cells occupied by ships still afloat.
    pub fn taken(&self) -> CellSet {
        self.taken
    }

    /// Cells where incoming shots missed. Permanently closed to placement.
    pub fn blocked(&self) -> CellSet {
        self.blocked
    }

    /// Every cell where an incoming shot ever struck a ship, including
    /// ships since sunk. Display bookkeeping only; legality never reads it.
    pub fn struck(&self) -> CellSet {
        self.struck
    }

    /// Ship size marked at `cell`, if a live ship covers it.
    pub fn size_at(&self, cell: Cell) -> Option<u8> {
        match self.sizes[cell.row() as usize][cell.col() as usize] {
            0 => None,
            size => Some(size),
        }
    }

    /// Live ships, in id order.
    pub fn ships(&self) -> impl Iterator<Item = (ShipId, &ShipRecord)> {
        self.ships.iter().map(|(id, rec)| (*id, rec))
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipRecord> {
        self.ships.get(&id)
    }

    /// Hull sizes waiting for a berth, next to try first.
    pub fn pending(&self) -> impl Iterator<Item = u8> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queue a hull at the back of the placement line. Used both for
    /// replacement awards and for hulls that currently fit nowhere.
    pub fn enqueue(&mut self, size: u8) {
        self.pending.push_back(size);
    }

    /// Take the next hull size off the placement line.
    pub fn pop_pending(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }

    /// All-or-nothing insertion of a validated ship.
    pub(crate) fn commit(&mut self, id: ShipId, size: u8, cells: CellSet) {
        for cell in cells.iter() {
            self.sizes[cell.row() as usize][cell.col() as usize] = size;
        }
        self.taken |= cells;
        self.ships.insert(
            id,
            ShipRecord {
                size,
                cells,
                hits: CellSet::new(),
            },
        );
    }

    /// Resolve an incoming shot.
    ///
    /// A miss blocks the cell. A hit is recorded against the owning ship;
    /// when that was the ship's last unhit cell, the record is dropped and
    /// the footprint is released back to open water. Repeat shots are the
    /// attacker's problem, not checked here.
    pub(crate) fn receive_shot(&mut self, cell: Cell) -> Impact {
        if !self.taken.contains(cell) {
            self.blocked.insert(cell);
            return Impact::Miss;
        }
        self.struck.insert(cell);
        let (ship, sunk) = match self
            .ships
            .iter_mut()
            .find(|(_, rec)| rec.cells.contains(cell))
        {
            Some((&id, rec)) => {
                rec.hits.insert(cell);
                (id, rec.hits == rec.cells)
            }
            None => panic!("taken cell {} has no owning ship", cell),
        };
        if !sunk {
            return Impact::Hit { ship };
        }
        let rec = self.ships.remove(&ship).expect("sunk ship had a record");
        self.taken -= rec.cells;
        for cell in rec.cells.iter() {
            self.sizes[cell.row() as usize][cell.col() as usize] = 0;
        }
        log::debug!("size-{} ship sunk, footprint released", rec.size);
        Impact::Sunk {
            ship,
            size: rec.size,
            cells: rec.cells,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        writeln!(f, "  taken: {:?}", self.taken)?;
        writeln!(f, "  blocked: {:?}", self.blocked)?;
        writeln!(f, "  struck: {:?}", self.struck)?;
        writeln!(f, "  pending: {:?}", self.pending)?;
        write!(f, "  ships:")?;
        for (id, rec) in self.ships.iter() {
            write!(f, " #{}(size {})", id, rec.size)?;
        }
        writeln!(f)?;
        write!(f, "}}")
    }
}
