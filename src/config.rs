/// Side length of the square grid.
pub const GRID_SIZE: u8 = 10;
/// Total number of cells, which is also each side's shot budget.
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);
/// Hull sizes every board starts with, in placement order.
pub const INITIAL_FLEET: [u8; 4] = [2, 3, 4, 5];
/// Parity step used for hunting when the defender has no ships afloat.
pub const MIN_SHIP_SIZE: u8 = 2;
