use alloc::vec::Vec;

use crate::attack::Attack;
use crate::board::Board;
use crate::common::Cell;

/// Interface implemented by interactive player front ends.
///
/// The engine owns all rule checks: whatever an implementation returns
/// is validated and re-requested until it passes, so implementations
/// only need to gather input, not enforce legality.
pub trait Player {
    /// Propose a placement for a hull of `size` cells on `board`.
    fn request_placement(&mut self, board: &Board, size: u8) -> Vec<Cell>;

    /// Propose the next shot, given this side's shot record and board.
    fn request_shot(&mut self, attack: &Attack, own: &Board) -> Cell;
}
