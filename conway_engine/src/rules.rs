// rules.rs - Conway's rules with color inheritance

use crate::color::determine_cell_color;
use crate::grid::{Cell, Grid};
use rand::Rng;

/// Live neighbors of `(row, col)`, 0..=8. Positions past the edge are skipped.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    grid.neighbors(row, col)
        .filter(|&(nr, nc)| grid.is_alive(nr, nc))
        .count() as u8
}

/// State of `(row, col)` one generation after `grid`.
pub fn next_cell<R: Rng + ?Sized>(grid: &Grid, row: usize, col: usize, rng: &mut R) -> Cell {
    let current = grid.get(row, col).copied().unwrap_or(Cell::DEAD);
    let count = count_live_neighbors(grid, row, col);

    match (current.is_alive(), count) {
        (true, 2) | (true, 3) => current, // Survival, color kept
        (false, 3) => {
            // Birth is judged on the old grid, so it is both "current" and "previous" here
            Cell::colored(determine_cell_color(grid, row, col, Some(grid), rng))
        }
        _ => Cell::DEAD, // Death or stays dead
    }
}

/// One row of the next generation.
pub fn next_row<R: Rng + ?Sized>(grid: &Grid, row: usize, rng: &mut R) -> Vec<Cell> {
    (0..grid.size()).map(|col| next_cell(grid, row, col, rng)).collect()
}

/// Applies survival and birth to every cell at once.
pub fn next_generation<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    let rows = (0..grid.size()).map(|row| next_row(grid, row, rng)).collect();
    // every row has grid.size() cells, so the result is always square
    Grid::from_rows(rows).unwrap_or_else(|| grid.cleared())
}
