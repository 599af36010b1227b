// color.rs - Color inheritance for newly live cells

use crate::grid::{Color, Grid};
use rand::Rng;
use rand::seq::SliceRandom;

/// Colors handed out when a new cell has no colored neighbor to inherit from.
pub const PALETTE: [Color; 8] = [
    Color::rgb(0xFF, 0x00, 0x00), // red
    Color::rgb(0x00, 0xFF, 0x00), // green
    Color::rgb(0x00, 0x00, 0xFF), // blue
    Color::rgb(0xFF, 0xFF, 0x00), // yellow
    Color::rgb(0xFF, 0x00, 0xFF), // magenta
    Color::rgb(0x00, 0xFF, 0xFF), // cyan
    Color::rgb(0xFF, 0xA5, 0x00), // orange
    Color::rgb(0x80, 0x00, 0x80), // purple
];

pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    *PALETTE.choose(rng).unwrap_or(&PALETTE[0])
}

/// Colors of the live, colored neighbors of `(row, col)` with their counts,
/// in the order each color was first met during the neighbor scan.
pub fn surrounding_colors(grid: &Grid, row: usize, col: usize) -> Vec<(Color, u8)> {
    let mut counts: Vec<(Color, u8)> = Vec::with_capacity(8);
    for (nr, nc) in grid.neighbors(row, col) {
        let Some(color) = grid.get(nr, nc).filter(|c| c.is_alive()).and_then(|c| c.color()) else {
            continue;
        };
        match counts.iter_mut().find(|(seen, _)| *seen == color) {
            Some((_, count)) => *count += 1,
            None => counts.push((color, 1)),
        }
    }
    counts
}

/// Highest count wins; on a tie the color met first wins.
pub fn most_frequent_color(counts: &[(Color, u8)]) -> Option<Color> {
    let mut best: Option<(Color, u8)> = None;
    for &(color, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((color, count));
        }
    }
    best.map(|(color, _)| color)
}

/// Picks the color for a cell that is becoming alive.
///
/// Neighbors in `previous` are consulted first when it is given, then neighbors
/// in `grid`, and a random palette color is the last resort.
pub fn determine_cell_color<R: Rng + ?Sized>(
    grid: &Grid,
    row: usize,
    col: usize,
    previous: Option<&Grid>,
    rng: &mut R,
) -> Color {
    previous
        .and_then(|prev| most_frequent_color(&surrounding_colors(prev, row, col)))
        .or_else(|| most_frequent_color(&surrounding_colors(grid, row, col)))
        .unwrap_or_else(|| random_color(rng))
}
