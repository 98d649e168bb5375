mod common;

use common::{art_of, grid_from_art, normalise, shifted, step_n};
use lifegrid::patterns::{find_pattern, PATTERNS};
use lifegrid::Grid;

#[test]
fn blinker_oscillates() {
    let mut grid = grid_from_art(
        "□□□□□
         □□□□□
         □■■■□
         □□□□□
         □□□□□",
    );
    let start = art_of(&grid);

    grid.step();
    assert_eq!(
        art_of(&grid),
        normalise(
            "□□□□□
             □□■□□
             □□■□□
             □□■□□
             □□□□□"
        )
    );

    grid.step();
    assert_eq!(art_of(&grid), start);
}

#[test]
fn toad_and_beacon_have_period_two() {
    for name in ["toad", "beacon"] {
        let cells = find_pattern(name).unwrap().cells_centered(15).unwrap();
        let mut grid = Grid::with_alive(15, &cells);

        grid.step();
        assert_ne!(grid.alive_cells(), cells, "{} should change after one step", name);
        grid.step();
        assert_eq!(grid.alive_cells(), cells, "{} should return after two steps", name);
    }
}

#[test]
fn still_lifes_are_unchanged() {
    let beehive = grid_from_art(
        "□□□□□□□
         □□□□□□□
         □□■■□□□
         □■□□■□□
         □□■■□□□
         □□□□□□□
         □□□□□□□",
    );
    let block = Grid::with_alive(7, &find_pattern("block").unwrap().cells_centered(7).unwrap());

    for original in [beehive, block] {
        let mut grid = original.clone();
        for _ in 0..2 {
            grid.step();
            assert_eq!(art_of(&grid), art_of(&original));
        }
    }
}

#[test]
fn glider_translates_diagonally_every_four_generations() {
    let cells = find_pattern("glider").unwrap().cells_centered(21).unwrap();
    let mut grid = Grid::with_alive(21, &cells);

    step_n(&mut grid, 4);
    assert_eq!(grid.alive_cells(), shifted(&cells, 1, 1));

    step_n(&mut grid, 4);
    assert_eq!(grid.alive_cells(), shifted(&cells, 2, 2));
    assert_eq!(grid.generation(), 8);
}

#[test]
fn blinker_on_the_edge_does_not_wrap() {
    let mut grid = grid_from_art(
        "□□□□□
         ■□□□□
         ■□□□□
         ■□□□□
         □□□□□",
    );

    grid.step();
    assert_eq!(
        art_of(&grid),
        normalise(
            "□□□□□
             □□□□□
             ■■□□□
             □□□□□
             □□□□□"
        )
    );

    grid.step();
    assert_eq!(grid.population(), 0);
}

#[test]
fn full_grid_keeps_only_corners() {
    let size = 5;
    let all: Vec<_> = (0..size).flat_map(|r| (0..size).map(move |c| (r, c))).collect();
    let mut grid = Grid::with_alive(size, &all);

    grid.step();
    // Corners have 3 neighbours, every other cell has 5 or 8
    assert_eq!(grid.alive_cells(), vec![(0, 0), (0, 4), (4, 0), (4, 4)]);
}

#[test]
fn every_builtin_pattern_seeds_its_own_cells() {
    for pattern in PATTERNS {
        let cells = pattern.cells_centered(lifegrid::grid::MAX_SIZE_GRID).unwrap();
        let grid = Grid::with_alive(lifegrid::grid::MAX_SIZE_GRID, &cells);
        assert_eq!(grid.population(), pattern.cells.len(), "{}", pattern.name);
    }
}
