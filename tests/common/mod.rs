#![allow(dead_code)]

use lifegrid::Grid;

/// Parse a square grid from the text format used in these tests
/// - ■: live cell
/// - □: dead cell
/// Surrounding whitespace on each line is ignored.
pub fn grid_from_art(art: &str) -> Grid {
    let lines: Vec<&str> = art
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let size = lines.len();

    let mut alive = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        assert_eq!(line.chars().count(), size, "row {} is not {} cells wide", row, size);
        for (col, ch) in line.chars().enumerate() {
            match ch {
                '■' => alive.push((row, col)),
                '□' => {}
                _ => panic!("unexpected character {:?} at ({}, {})", ch, row, col),
            }
        }
    }

    Grid::with_alive(size, &alive)
}

/// Inverse of `grid_from_art`, one line per row
pub fn art_of(grid: &Grid) -> String {
    let mut result = String::new();
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            result.push(if grid.read(row, col).is_alive() { '■' } else { '□' });
        }
        result.push('\n');
    }
    result
}

/// Normalise art written inline in a test to what `art_of` produces
pub fn normalise(art: &str) -> String {
    art_of(&grid_from_art(art))
}

pub fn step_n(grid: &mut Grid, n: usize) {
    for _ in 0..n {
        grid.step();
    }
}

/// Live cells shifted by (d_row, d_col)
pub fn shifted(cells: &[(usize, usize)], d_row: usize, d_col: usize) -> Vec<(usize, usize)> {
    cells.iter().map(|&(r, c)| (r + d_row, c + d_col)).collect()
}
