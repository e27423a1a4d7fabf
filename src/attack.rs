//! One side's offensive record and the hunt/target gunnery logic.

use alloc::vec::Vec;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::board::{Board, Impact};
use crate::cellset::CellSet;
use crate::common::{Cell, GameError, ShotOutcome};
use crate::config::{CELL_COUNT, MIN_SHIP_SIZE};

/// How the automatic gunner is choosing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiMode {
    /// Sweeping the grid for a first contact.
    #[default]
    Hunt,
    /// Working the neighbourhood of a confirmed hit.
    Target,
}

/// Shot history and targeting state for one side.
///
/// `guesses` is the ordered shot log and doubles as the shot budget: a
/// side whose log fills the grid is out of shots. Sinking a ship purges
/// its footprint from both `guesses` and `hits`, so those cells can be
/// attacked again once the defender rebuilds over them.
#[derive(Debug, Clone, Default)]
pub struct Attack {
    guesses: Vec<Cell>,
    misses: CellSet,
    hits: CellSet,
    mode: AiMode,
    stack: Vec<Cell>,
}

impl Attack {
    pub fn new() -> Self {
        Attack::default()
    }

    /// Cells guessed so far, oldest first. Entries vanish when the ship
    /// they struck goes down.
    pub fn guesses(&self) -> &[Cell] {
        &self.guesses
    }

    /// Resolved misses.
    pub fn misses(&self) -> CellSet {
        self.misses
    }

    /// Hits on ships that are still afloat.
    pub fn hits(&self) -> CellSet {
        self.hits
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    /// Queued target-mode candidates, next pop last.
    pub fn target_stack(&self) -> &[Cell] {
        &self.stack
    }

    /// Shots spent out of the grid-sized budget.
    pub fn shots_spent(&self) -> usize {
        self.guesses.len()
    }

    pub fn out_of_shots(&self) -> bool {
        self.guesses.len() >= CELL_COUNT
    }

    /// A shot whose outcome is already on the books: a known miss, or a
    /// hit on a ship still afloat.
    pub fn is_spent_shot(&self, cell: Cell) -> bool {
        self.misses.contains(cell) || self.hits.contains(cell)
    }

    /// Resolve one shot against `target`.
    ///
    /// Wasted shots are refused. A hit flips the gunner into target mode
    /// and queues the neighbours of the struck cell. A sink then purges
    /// the sunk footprint from this side's books; if it was the
    /// defender's last ship the gunner falls back to hunt with a clean
    /// stack.
    pub fn fire(&mut self, target: &mut Board, cell: Cell) -> Result<ShotOutcome, GameError> {
        if self.is_spent_shot(cell) {
            return Err(GameError::RepeatShot);
        }
        self.guesses.push(cell);
        match target.receive_shot(cell) {
            Impact::Miss => {
                self.misses.insert(cell);
                Ok(ShotOutcome::Miss)
            }
            Impact::Hit { .. } => {
                self.hits.insert(cell);
                self.mode = AiMode::Target;
                self.push_neighbors(cell);
                Ok(ShotOutcome::Hit)
            }
            Impact::Sunk { size, cells, .. } => {
                self.hits.insert(cell);
                self.mode = AiMode::Target;
                self.push_neighbors(cell);
                // The sunk footprint leaves the books so the freed water
                // can be shot at again.
                self.hits -= cells;
                self.guesses.retain(|guess| !cells.contains(*guess));
                if !target.has_live_ships() {
                    self.mode = AiMode::Hunt;
                    self.stack.clear();
                }
                Ok(ShotOutcome::Sunk(size))
            }
        }
    }

    /// Queue unguessed, unqueued neighbours of `cell` in up, down, left,
    /// right order.
    fn push_neighbors(&mut self, cell: Cell) {
        for next in cell.neighbors() {
            if !self.guesses.contains(&next) && !self.stack.contains(&next) {
                self.stack.push(next);
            }
        }
    }

    /// Choose the next shot: work the target stack first, otherwise hunt.
    ///
    /// Stack entries that were guessed in the meantime are discarded as
    /// they surface. The mode reported afterwards reflects where the
    /// pick actually came from.
    pub fn pick<R: Rng>(&mut self, defender: &Board, rng: &mut R) -> Cell {
        while let Some(cell) = self.stack.pop() {
            if !self.guesses.contains(&cell) {
                self.mode = AiMode::Target;
                return cell;
            }
        }
        self.mode = AiMode::Hunt;
        self.hunt(defender, rng)
    }

    /// Parity sweep: only cells whose coordinate sum is a multiple of the
    /// defender's smallest live ship size, every unguessed cell once the
    /// parity set runs dry.
    fn hunt<R: Rng>(&self, defender: &Board, rng: &mut R) -> Cell {
        let step = defender.smallest_live_ship().unwrap_or(MIN_SHIP_SIZE);
        let unguessed: Vec<Cell> = Cell::all()
            .filter(|cell| !self.guesses.contains(cell))
            .collect();
        let spaced: Vec<Cell> = unguessed
            .iter()
            .copied()
            .filter(|cell| (cell.row() + cell.col()) % step == 0)
            .collect();
        let pool = if spaced.is_empty() { &unguessed } else { &spaced };
        *pool
            .choose(rng)
            .expect("gunner asked to fire with every cell spent")
    }
}
