//! Grid storage for the Game of Life board.
//!
//! `Grid` is a plain fixed-size field of cells. `GridStore` owns the current
//! generation and keeps the list of alive cells in sync with it.

use rand::Rng;

/// Position of a cell on the grid. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A `cols x rows` field of alive/dead cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; cols * rows],
        }
    }

    /// Grid where every cell is alive with probability 0.5.
    pub fn random<R: Rng + ?Sized>(cols: usize, rows: usize, rng: &mut R) -> Self {
        let cells = (0..cols * rows).map(|_| rng.gen_bool(0.5)).collect();
        Self { cols, rows, cells }
    }

    /// Builds a grid from a list of alive cells. Cells outside the grid are ignored.
    pub fn with_alive(cols: usize, rows: usize, alive: &[Cell]) -> Self {
        let mut grid = Self::new(cols, rows);
        for cell in alive {
            if grid.contains(cell.x as i64, cell.y as i64) {
                grid.set(*cell, true);
            }
        }
        grid
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether signed coordinates fall inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    /// Bounds-checked conversion of signed coordinates into a [`Cell`].
    pub fn cell_at(&self, x: i64, y: i64) -> Option<Cell> {
        self.contains(x, y).then(|| Cell::new(x as usize, y as usize))
    }

    fn index(&self, cell: Cell) -> usize {
        cell.y * self.cols + cell.x
    }

    /// State of an in-bounds cell.
    ///
    /// Panics if `cell` is outside the grid.
    pub fn is_alive(&self, cell: Cell) -> bool {
        assert!(cell.x < self.cols && cell.y < self.rows, "cell {cell:?} out of bounds");
        self.cells[self.index(cell)]
    }

    /// State at signed coordinates; `None` outside the grid.
    pub fn get(&self, x: i64, y: i64) -> Option<bool> {
        self.cell_at(x, y).map(|cell| self.cells[self.index(cell)])
    }

    pub fn set(&mut self, cell: Cell, alive: bool) {
        assert!(cell.x < self.cols && cell.y < self.rows, "cell {cell:?} out of bounds");
        let idx = self.index(cell);
        self.cells[idx] = alive;
    }

    /// Lazily yields every alive cell in row-major order.
    ///
    /// The iterator borrows the grid, so calling this again restarts the scan.
    pub fn alive_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(idx, _)| Cell::new(idx % cols, idx / cols))
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|alive| **alive).count()
    }
}

/// Owns the current generation and the derived alive-cell list.
///
/// Every mutation goes through a method that rebuilds the list, so
/// [`GridStore::alive`] always matches [`GridStore::grid`].
#[derive(Debug, Clone)]
pub struct GridStore {
    grid: Grid,
    alive: Vec<Cell>,
    generation: u64,
}

impl GridStore {
    /// Store holding an all-dead grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            alive: Vec::new(),
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Alive cells of the current generation. Order is not meaningful.
    pub fn alive(&self) -> &[Cell] {
        &self.alive
    }

    /// Number of steps since the last clear or randomize.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Flips the cell at `(x, y)`. Returns `false` and leaves the grid
    /// untouched when the coordinates are outside the grid.
    pub fn toggle(&mut self, x: i64, y: i64) -> bool {
        let Some(cell) = self.grid.cell_at(x, y) else {
            return false;
        };
        let alive = self.grid.is_alive(cell);
        self.grid.set(cell, !alive);
        self.refresh_alive();
        true
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid = Grid::random(self.grid.cols(), self.grid.rows(), rng);
        self.generation = 0;
        self.refresh_alive();
    }

    pub fn clear(&mut self) {
        self.grid = Grid::new(self.grid.cols(), self.grid.rows());
        self.generation = 0;
        self.refresh_alive();
    }

    /// Installs the next generation produced by the stepper.
    ///
    /// Panics if `next` has different dimensions; the board size never changes.
    pub fn advance(&mut self, next: Grid) {
        assert_eq!(
            (next.cols(), next.rows()),
            (self.grid.cols(), self.grid.rows()),
            "grid dimensions are fixed"
        );
        self.grid = next;
        self.generation += 1;
        self.refresh_alive();
    }

    fn refresh_alive(&mut self) {
        self.alive.clear();
        self.alive.extend(self.grid.alive_cells());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn new_store_is_all_dead() {
        let store = GridStore::new(6, 4);
        assert_eq!(store.grid().cols(), 6);
        assert_eq!(store.grid().rows(), 4);
        assert_eq!(store.grid().alive_count(), 0);
        assert!(store.alive().is_empty());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn toggle_twice_restores_cell_only() {
        let mut store = GridStore::new(5, 5);
        store.toggle(0, 0);
        store.toggle(4, 4);
        let before = store.grid().clone();

        assert!(store.toggle(2, 3));
        assert!(store.grid().is_alive(Cell::new(2, 3)));
        assert_eq!(store.alive().len(), 3);

        assert!(store.toggle(2, 3));
        assert_eq!(store.grid(), &before);
        assert_eq!(store.alive().len(), 2);
    }

    #[test]
    fn toggle_out_of_bounds_is_noop() {
        let mut store = GridStore::new(3, 3);
        assert!(!store.toggle(-1, 0));
        assert!(!store.toggle(0, -1));
        assert!(!store.toggle(3, 0));
        assert!(!store.toggle(0, 3));
        assert_eq!(store.grid(), &Grid::new(3, 3));
    }

    #[test]
    fn alive_list_matches_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::random(13, 9, &mut rng);

        let listed: Vec<Cell> = grid.alive_cells().collect();
        assert_eq!(listed.len(), grid.alive_count());

        let unique: HashSet<Cell> = listed.iter().copied().collect();
        assert_eq!(unique.len(), listed.len());

        for y in 0..grid.rows() {
            for x in 0..grid.cols() {
                let cell = Cell::new(x, y);
                assert_eq!(grid.is_alive(cell), unique.contains(&cell));
            }
        }

        // Restartable: a second scan yields the same cells.
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), listed);
    }

    #[test]
    fn randomize_is_close_to_half() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut store = GridStore::new(60, 45);
        let trials = 50;
        let mut alive = 0;
        for _ in 0..trials {
            store.randomize(&mut rng);
            assert_eq!(store.alive().len(), store.grid().alive_count());
            alive += store.grid().alive_count();
        }
        let fraction = alive as f64 / (trials * 60 * 45) as f64;
        assert!((fraction - 0.5).abs() < 0.02, "alive fraction {fraction}");
    }

    #[test]
    fn clear_and_randomize_reset_generation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut store = GridStore::new(4, 4);
        store.advance(Grid::new(4, 4));
        store.advance(Grid::new(4, 4));
        assert_eq!(store.generation(), 2);

        store.randomize(&mut rng);
        assert_eq!(store.generation(), 0);

        store.advance(Grid::new(4, 4));
        store.clear();
        assert_eq!(store.generation(), 0);
        assert!(store.alive().is_empty());
    }

    #[test]
    #[should_panic(expected = "grid dimensions are fixed")]
    fn advance_rejects_resized_grid() {
        let mut store = GridStore::new(4, 4);
        store.advance(Grid::new(5, 4));
    }

    #[test]
    fn with_alive_skips_outside_cells() {
        let grid = Grid::with_alive(3, 3, &[Cell::new(1, 1), Cell::new(7, 0)]);
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![Cell::new(1, 1)]);
        assert_eq!(grid.get(7, 0), None);
        assert_eq!(grid.get(1, 1), Some(true));
    }
}
