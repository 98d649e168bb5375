use crate::grid::VisibleExtent;

/// Smallest visible window, in cells
pub const MIN_SIZE_GRID: usize = 3;
/// Visible window width at startup
pub const DEFAULT_VISIBLE_CELLS: usize = 25;

/// Inclusive index range of the centred sub-square `nb_cells` wide.
/// `nb_cells` is clamped to `[MIN_SIZE_GRID, grid_size]` first.
pub fn visible_extent(nb_cells: usize, grid_size: usize) -> VisibleExtent {
    assert!(nb_cells % 2 == 1, "visible cell count must be odd, got {}", nb_cells);
    let nb_cells = nb_cells.clamp(MIN_SIZE_GRID, grid_size);
    let mid = grid_size / 2;
    VisibleExtent {
        start: mid - nb_cells / 2,
        end: mid + nb_cells / 2,
    }
}

/// Pixel placement of the rendered grid square inside the window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub cell_pixel_width: u32,
    /// Horizontal offset of the square's left edge
    pub dx: u32,
    /// Vertical offset of the square's top edge
    pub dy: u32,
}

/// Largest square of `nb_cells` whole cells that fits the window, centred
pub fn layout(window_width: u32, window_height: u32, nb_cells: usize) -> Layout {
    let nb = nb_cells.max(1) as u32;
    let cell_pixel_width = window_width.min(window_height) / nb;
    let extent = nb * cell_pixel_width;
    Layout {
        cell_pixel_width,
        dx: (window_width - extent) / 2,
        dy: (window_height - extent) / 2,
    }
}

impl Layout {
    /// Total side of the rendered square in pixels
    pub fn square_width(&self, nb_cells: usize) -> u32 {
        self.cell_pixel_width * nb_cells as u32
    }

    /// Visible-local (row, col) under a pixel.
    ///
    /// Never fails: pixels left/above the square map to index 0 and pixels
    /// right/below it map to `nb_cells - 1`.
    pub fn pixel_to_cell(&self, px: f32, py: f32, nb_cells: usize) -> (usize, usize) {
        if self.cell_pixel_width == 0 {
            return (nb_cells / 2, nb_cells / 2);
        }
        let width = self.cell_pixel_width as f32;
        let last = nb_cells.saturating_sub(1) as i64;
        let col = (((px - self.dx as f32) / width).floor() as i64).clamp(0, last);
        let row = (((py - self.dy as f32) / width).floor() as i64).clamp(0, last);
        (row as usize, col as usize)
    }

    /// Whether a pixel lies on the rendered square
    pub fn contains_pixel(&self, px: f32, py: f32, nb_cells: usize) -> bool {
        let side = self.square_width(nb_cells) as f32;
        let (left, top) = (self.dx as f32, self.dy as f32);
        side > 0.0 && px >= left && px < left + side && py >= top && py < top + side
    }

    /// Top-left corner of a visible-local cell, in pixels
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        let w = self.cell_pixel_width as f32;
        (self.dx as f32 + col as f32 * w, self.dy as f32 + row as f32 * w)
    }
}

/// Zoom level plus window size; maps between window pixels and absolute grid cells
#[derive(Clone, Debug)]
pub struct Viewport {
    grid_size: usize,
    nb_cells: usize,
    window_width: u32,
    window_height: u32,
}

impl Viewport {
    pub fn new(grid_size: usize, nb_cells: usize, window_width: u32, window_height: u32) -> Self {
        let extent = visible_extent(nb_cells, grid_size);
        Viewport {
            grid_size,
            nb_cells: extent.len(),
            window_width,
            window_height,
        }
    }

    /// Visible width in cells (always odd)
    pub fn nb_cells(&self) -> usize {
        self.nb_cells
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn resize(&mut self, window_width: u32, window_height: u32) {
        self.window_width = window_width;
        self.window_height = window_height;
    }

    /// Show fewer cells. Returns false if already at the minimum.
    pub fn zoom_in(&mut self) -> bool {
        if self.nb_cells > MIN_SIZE_GRID {
            self.nb_cells -= 2;
            true
        } else {
            false
        }
    }

    /// Show more cells. Returns false if the whole grid is already visible.
    pub fn zoom_out(&mut self) -> bool {
        if self.nb_cells < self.grid_size {
            self.nb_cells += 2;
            true
        } else {
            false
        }
    }

    pub fn extent(&self) -> VisibleExtent {
        visible_extent(self.nb_cells, self.grid_size)
    }

    pub fn layout(&self) -> Layout {
        layout(self.window_width, self.window_height, self.nb_cells)
    }

    pub fn contains_pixel(&self, px: f32, py: f32) -> bool {
        self.layout().contains_pixel(px, py, self.nb_cells)
    }

    /// Absolute grid cell under a pixel, clamped onto the visible square.
    ///
    /// Anchored on the grid centre, so the cell under the window's centre
    /// pixel stays the same across zoom levels.
    pub fn cell_at(&self, px: f32, py: f32) -> (usize, usize) {
        let (row, col) = self.layout().pixel_to_cell(px, py, self.nb_cells);
        let mid = self.grid_size / 2;
        let half = self.nb_cells / 2;
        (mid + row - half, mid + col - half)
    }
}
