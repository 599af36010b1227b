// patterns.rs - Seed patterns, placed in the middle of whatever grid is in play

use crate::color::{PALETTE, random_color};
use crate::grid::{Cell, Grid};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A named shape, cells given relative to its top-left corner.
pub struct Pattern {
    pub name  : &'static str,
    pub cells : &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 24), (1, 22), (1, 24), (2, 12), (2, 13), (2, 20), (2, 21), (2, 34),
            (2, 35), (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35), (4, 0),
            (4, 1), (4, 10), (4, 16), (4, 20), (4, 21), (5, 0), (5, 1), (5, 10),
            (5, 14), (5, 16), (5, 17), (5, 22), (5, 24), (6, 10), (6, 16), (6, 24),
            (7, 11), (7, 15), (8, 12), (8, 13),
        ],
    },
];

pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    pub fn height(&self) -> usize {
        self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Side length of the smallest square grid that holds the pattern.
    pub fn extent(&self) -> usize {
        self.height().max(self.width())
    }

    /// Absolute cell positions when centered on a `size x size` grid,
    /// or `None` if it does not fit.
    pub fn placed(&self, size: usize) -> Option<Vec<(usize, usize)>> {
        if self.height() > size || self.width() > size {
            return None;
        }
        let top = (size - self.height()) / 2;
        let left = (size - self.width()) / 2;
        Some(self.cells.iter().map(|&(r, c)| (top + r, left + c)).collect())
    }

    /// Fresh grid holding only this pattern, drawn in one palette color.
    pub fn to_grid<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Option<Grid> {
        let cells = self.placed(size)?;
        let color = random_color(rng);
        let mut grid = Grid::new(size);
        for (row, col) in cells {
            if let Some(cell) = grid.get_mut(row, col) {
                *cell = Cell::colored(color);
            }
        }
        Some(grid)
    }
}

/// Roughly a third of the cells alive, each with its own palette color.
/// The same seed always gives the same board.
pub fn random_grid(size: usize, seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new(size);
    for row in 0..size {
        for col in 0..size {
            if rng.gen_range(0..3) == 0 {
                let color = PALETTE[rng.gen_range(0..PALETTE.len())];
                if let Some(cell) = grid.get_mut(row, col) {
                    *cell = Cell::colored(color);
                }
            }
        }
    }
    grid
}
