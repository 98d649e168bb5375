use serde::{Deserialize, Serialize};

/// Default side length of the simulated grid. Odd so a single centre cell exists.
pub const MAX_SIZE_GRID: usize = 101;
/// Centre index of the default grid
pub const MID_SIZE_GRID: usize = MAX_SIZE_GRID / 2;

/// A live cell with fewer neighbours than this dies
pub const UNDERPOPULATION: u8 = 2;
/// A live cell with more neighbours than this dies
pub const OVERPOPULATION: u8 = 3;
/// A dead cell with exactly this many neighbours is born
pub const REPRODUCTION: u8 = 3;

/// Moore neighbourhood as (d_row, d_col)
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Dead => CellState::Alive,
            CellState::Alive => CellState::Dead,
        }
    }
}

/// One grid cell. `next` is scratch space used only while a step is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub current: CellState,
    pub next: CellState,
}

/// Square grid with hard edges (no wrap-around)
#[derive(Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    generation: u64,
    /// Revision number - incremented whenever grid cells change
    revision: u64,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(size: usize) -> Self {
        assert!(size >= 3, "grid size must be at least 3, got {}", size);
        assert!(size % 2 == 1, "grid size must be odd, got {}", size);
        Grid {
            size,
            cells: vec![Cell::default(); size * size],
            generation: 0,
            revision: 0,
        }
    }

    /// Create a grid and seed it with the given live cells
    pub fn with_alive(size: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(size);
        grid.seed(alive);
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the centre row/column
    pub fn mid(&self) -> usize {
        self.size / 2
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get current grid revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Convert (row, col) to the row-major cell index
    pub fn get_id(&self, row: usize, col: usize) -> usize {
        assert!(
            self.in_bounds(row, col),
            "cell ({}, {}) outside {}x{} grid",
            row, col, self.size, self.size
        );
        row * self.size + col
    }

    /// Convert a cell index back to (row, col)
    pub fn get_coords(&self, id: usize) -> (usize, usize) {
        (id / self.size, id % self.size)
    }

    pub fn read(&self, row: usize, col: usize) -> CellState {
        self.cells[self.get_id(row, col)].current
    }

    pub fn write(&mut self, row: usize, col: usize, state: CellState) {
        let id = self.get_id(row, col);
        if self.cells[id].current != state {
            self.cells[id].current = state;
            self.revision += 1;
        }
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> CellState {
        let state = self.read(row, col).toggled();
        self.write(row, col, state);
        state
    }

    /// Set the listed cells alive and every other cell dead.
    /// Resets the generation counter.
    pub fn seed(&mut self, alive: &[(usize, usize)]) {
        for &(row, col) in alive {
            assert!(
                self.in_bounds(row, col),
                "seed cell ({}, {}) outside {}x{} grid",
                row, col, self.size, self.size
            );
        }

        for cell in &mut self.cells {
            *cell = Cell::default();
        }
        for &(row, col) in alive {
            let id = self.get_id(row, col);
            self.cells[id].current = CellState::Alive;
        }

        self.generation = 0;
        self.revision += 1;
        log::debug!("Seeded grid with {} live cells", self.population());
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.seed(&[]);
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.current.is_alive()).count()
    }

    /// Count live cells in the Moore neighbourhood of (row, col).
    /// Neighbours outside the grid count as dead.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for &(d_row, d_col) in &NEIGHBORS {
            let (Some(r), Some(c)) = (row.checked_add_signed(d_row), col.checked_add_signed(d_col)) else {
                continue;
            };
            if r < self.size && c < self.size && self.cells[r * self.size + c].current.is_alive() {
                count += 1;
            }
        }
        count
    }

    /// Advance the whole grid by one generation.
    ///
    /// The first pass only writes `next`; no `current` changes until every
    /// cell has been computed, so the result does not depend on visit order.
    pub fn step(&mut self) {
        for id in 0..self.cells.len() {
            let (row, col) = self.get_coords(id);
            let k = self.live_neighbors(row, col);
            self.cells[id].next = next_state(self.cells[id].current, k);
        }

        let mut changed = 0;
        for cell in &mut self.cells {
            if cell.current != cell.next {
                changed += 1;
            }
            cell.current = cell.next;
        }

        self.generation += 1;
        if changed > 0 {
            self.revision += 1;
        }
        log::debug!("Generation {}: {} cells changed", self.generation, changed);
    }

    /// Borrow the square sub-grid covered by `extent`
    pub fn view(&self, extent: VisibleExtent) -> GridView<'_> {
        assert!(
            extent.end < self.size,
            "extent {}..={} outside {}x{} grid",
            extent.start, extent.end, self.size, self.size
        );
        GridView { grid: self, extent }
    }

    /// Absolute coordinates of every live cell, row-major
    pub fn alive_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.current.is_alive())
            .map(|(id, _)| self.get_coords(id))
            .collect()
    }
}

/// The rule itself: state after one generation given current state and live neighbour count
pub fn next_state(current: CellState, live_neighbors: u8) -> CellState {
    match current {
        CellState::Alive if (UNDERPOPULATION..=OVERPOPULATION).contains(&live_neighbors) => {
            CellState::Alive
        }
        CellState::Dead if live_neighbors == REPRODUCTION => CellState::Alive,
        _ => CellState::Dead,
    }
}

/// Inclusive index range shown on both axes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleExtent {
    pub start: usize,
    pub end: usize,
}

impl VisibleExtent {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start..=self.end).contains(&row) && (self.start..=self.end).contains(&col)
    }
}

/// Read-only window onto a square region of a grid.
/// Coordinates passed to `get` are local to the region.
#[derive(Clone, Copy)]
pub struct GridView<'a> {
    grid: &'a Grid,
    extent: VisibleExtent,
}

impl<'a> GridView<'a> {
    /// Side length of the view in cells
    pub fn size(&self) -> usize {
        self.extent.len()
    }

    pub fn extent(&self) -> VisibleExtent {
        self.extent
    }

    pub fn get(&self, row: usize, col: usize) -> CellState {
        assert!(row < self.size() && col < self.size(), "view cell ({}, {}) out of range", row, col);
        self.grid.read(self.extent.start + row, self.extent.start + col)
    }

    /// Local coordinates of every live cell in the view, row-major
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + 'a {
        let view = *self;
        let n = self.size();
        (0..n)
            .flat_map(move |row| (0..n).map(move |col| (row, col)))
            .filter(move |&(row, col)| view.get(row, col).is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 11;

    fn centre_with_neighbors(alive_centre: bool, neighbors: &[(usize, usize)]) -> Grid {
        let mut cells = neighbors.to_vec();
        if alive_centre {
            cells.push((5, 5));
        }
        Grid::with_alive(N, &cells)
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        let mut grid = centre_with_neighbors(false, &[(4, 4), (4, 5), (4, 6)]);
        grid.step();
        assert_eq!(grid.read(5, 5), CellState::Alive);
    }

    #[test]
    fn dead_cell_with_two_neighbors_stays_dead() {
        let mut grid = centre_with_neighbors(false, &[(4, 4), (6, 6)]);
        grid.step();
        assert_eq!(grid.read(5, 5), CellState::Dead);
    }

    #[test]
    fn underpopulation_kills() {
        let cases: [&[(usize, usize)]; 2] = [&[], &[(4, 5)]];
        for neighbors in cases {
            let mut grid = centre_with_neighbors(true, neighbors);
            grid.step();
            assert_eq!(grid.read(5, 5), CellState::Dead, "neighbors: {:?}", neighbors);
        }
    }

    #[test]
    fn overpopulation_kills() {
        let ring = [(4, 4), (4, 5), (4, 6), (5, 4), (5, 6), (6, 4), (6, 5), (6, 6)];
        for k in 4..=8 {
            let mut grid = centre_with_neighbors(true, &ring[..k]);
            grid.step();
            assert_eq!(grid.read(5, 5), CellState::Dead, "{} neighbors", k);
        }
    }

    #[test]
    fn two_or_three_neighbors_survive() {
        let mut grid = centre_with_neighbors(true, &[(4, 4), (6, 6)]);
        grid.step();
        assert_eq!(grid.read(5, 5), CellState::Alive);

        let mut grid = centre_with_neighbors(true, &[(4, 4), (6, 6), (4, 6)]);
        grid.step();
        assert_eq!(grid.read(5, 5), CellState::Alive);
    }

    #[test]
    fn isolated_cell_dies_and_grid_empties() {
        let mut grid = Grid::with_alive(N, &[(5, 5)]);
        grid.step();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn blinker_has_period_two() {
        let seed = [(5, 4), (5, 5), (5, 6)];
        let mut grid = Grid::with_alive(N, &seed);

        grid.step();
        assert_eq!(grid.alive_cells(), vec![(4, 5), (5, 5), (6, 5)]);

        grid.step();
        assert_eq!(grid.alive_cells(), seed.to_vec());
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn block_is_still_life() {
        let block = vec![(5, 5), (5, 6), (6, 5), (6, 6)];
        let mut grid = Grid::with_alive(N, &block);
        let revision = grid.revision();
        for _ in 0..2 {
            grid.step();
            assert_eq!(grid.alive_cells(), block);
        }
        assert_eq!(grid.revision(), revision);
    }

    #[test]
    fn corner_cells_see_no_wrapped_neighbors() {
        // A blinker lying on the top edge would wrap on a torus
        let mut grid = Grid::with_alive(N, &[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(grid.live_neighbors(0, 0), 1);
        assert_eq!(grid.live_neighbors(N - 1, 1), 0);
        grid.step();
        assert_eq!(grid.alive_cells(), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn edited_dead_cell_is_not_resurrected_by_stale_scratch() {
        let mut grid = Grid::with_alive(N, &[(5, 4), (5, 5), (5, 6)]);
        grid.step();
        // (4, 5) is alive now and its scratch slot still says alive
        grid.write(4, 5, CellState::Dead);
        grid.step();
        assert_eq!(grid.read(4, 5), CellState::Dead);
    }

    #[test]
    fn toggle_flips_and_bumps_revision() {
        let mut grid = Grid::new(N);
        let before = grid.revision();
        assert_eq!(grid.toggle(2, 3), CellState::Alive);
        assert_eq!(grid.toggle(2, 3), CellState::Dead);
        assert_eq!(grid.revision(), before + 2);
    }

    #[test]
    fn seed_replaces_contents_and_resets_generation() {
        let mut grid = Grid::with_alive(N, &[(1, 1)]);
        grid.step();
        grid.seed(&[(2, 2), (3, 3)]);
        assert_eq!(grid.alive_cells(), vec![(2, 2), (3, 3)]);
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn view_reads_local_coordinates() {
        let grid = Grid::with_alive(N, &[(4, 4), (6, 5)]);
        let view = grid.view(VisibleExtent { start: 4, end: 6 });
        assert_eq!(view.size(), 3);
        assert_eq!(view.get(0, 0), CellState::Alive);
        assert_eq!(view.alive_cells().collect::<Vec<_>>(), vec![(0, 0), (2, 1)]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_read_panics() {
        Grid::new(N).read(N, 0);
    }

    #[test]
    #[should_panic]
    fn even_grid_size_panics() {
        Grid::new(10);
    }

    #[test]
    #[should_panic]
    fn seed_outside_grid_panics() {
        Grid::new(N).seed(&[(0, N)]);
    }
}
