//! Generation step for Conway's Game of Life.
//!
//! Standard B3/S23 rules on a bounded grid:
//! 1. Any live cell with fewer than two live neighbors dies (underpopulation)
//! 2. Any live cell with two or three live neighbors lives (survival)
//! 3. Any live cell with more than three live neighbors dies (overpopulation)
//! 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
//!
//! Cells outside the grid count as dead; there is no wraparound.

use crate::grid::{Cell, Grid};

/// Offsets of the eight cells surrounding a cell.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count alive neighbors of `cell`, skipping positions outside the grid.
pub fn count_neighbors(grid: &Grid, cell: Cell) -> u8 {
    let (x, y) = (cell.x as i64, cell.y as i64);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy)| grid.get(x + dx, y + dy) == Some(true))
        .count() as u8
}

/// Next state of a single cell given its current state and alive-neighbor count.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        // Birth, or survival with three neighbors
        (_, 3) => true,
        // Survival with two neighbors
        (true, 2) => true,
        // A dead cell with two neighbors stays dead
        (false, 2) => false,
        // Underpopulation or overpopulation
        (_, _) => false,
    }
}

/// Apply the rules to every cell and return the next generation.
///
/// The input is never modified; the result has the same dimensions.
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.cols(), grid.rows());
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let cell = Cell::new(x, y);
            let alive = next_state(grid.is_alive(cell), count_neighbors(grid, cell));
            if alive {
                next.set(cell, true);
            }
        }
    }
    next
}
