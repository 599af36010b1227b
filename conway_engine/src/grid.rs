// grid.rs - Grid types for Conway's Game of Life

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Neighbor offsets in scan order: row offset -1..=1, then column offset -1..=1, self skipped.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// 24-bit cell color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// One grid position. A dead cell never carries a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    alive: bool,
    color: Option<Color>,
}

impl Cell {
    pub const DEAD: Cell = Cell { alive: false, color: None };

    pub const fn live(color: Option<Color>) -> Self {
        Self { alive: true, color }
    }

    pub const fn colored(color: Color) -> Self {
        Self::live(Some(color))
    }

    /// Builds a cell from loose parts, dropping any color on a dead cell.
    pub fn from_parts(alive: bool, color: Option<Color>) -> Self {
        if alive { Self::live(color) } else { Self::DEAD }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }
}

/// Square `size x size` matrix of cells, stored row-major. Edges are hard boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::DEAD; size * size],
        }
    }

    /// Reassembles a grid from `size` rows of `size` cells each.
    ///
    /// Returns `None` when the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Grid with the listed cells alive, each with the given color.
    /// Coordinates outside the grid are skipped; see `Grid::contains`.
    pub fn with_live_cells(size: usize, live: &[(usize, usize, Option<Color>)]) -> Self {
        let mut grid = Self::new(size);
        for &(row, col, color) in live {
            if let Some(cell) = grid.get_mut(row, col) {
                *cell = Cell::live(color);
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.contains(row, col) {
            self.cells.get(row * self.size + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if self.contains(row, col) {
            self.cells.get_mut(row * self.size + col)
        } else {
            None
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_alive)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics, an empty grid simply has no rows
        self.cells.chunks(self.size.max(1))
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        let start = row.checked_mul(self.size)?;
        (row < self.size).then(|| &self.cells[start..start + self.size])
    }

    /// Live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(i, cell)| (i / size, i % size, cell))
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn has_live_cells(&self) -> bool {
        self.cells.iter().any(Cell::is_alive)
    }

    /// In-bounds neighbor coordinates of `(row, col)` in scan order.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let nr = row.checked_add_signed(dr)?;
            let nc = col.checked_add_signed(dc)?;
            self.contains(nr, nc).then_some((nr, nc))
        })
    }

    /// True when both grids have the same size and the same live cells. Colors are ignored.
    pub fn same_liveness(&self, other: &Grid) -> bool {
        self.size == other.size
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.is_alive() == b.is_alive())
    }

    /// Same size, every cell dead.
    pub fn cleared(&self) -> Self {
        Self::new(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_live_cells_skips_outside_coordinates() {
        let grid = Grid::with_live_cells(3, &[(1, 1, None), (3, 0, None), (0, 7, None)]);
        assert_eq!(grid.live_count(), 1);
        assert!(grid.is_alive(1, 1));
    }

    #[test]
    fn color_parses_and_formats_uppercase() {
        let color: Color = "#ffa500".parse().unwrap();
        assert_eq!(color, Color::rgb(0xFF, 0xA5, 0x00));
        assert_eq!(color.to_string(), "#FFA500");
    }

    #[test]
    fn color_rejects_malformed_strings() {
        for bad in ["FFA500", "#FFA50", "#FFA5000", "#GGGGGG", "", "#"] {
            assert!(bad.parse::<Color>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn dead_cells_never_keep_a_color() {
        let cell = Cell::from_parts(false, Some(Color::rgb(1, 2, 3)));
        assert_eq!(cell, Cell::DEAD);
        assert_eq!(cell.color(), None);
    }

    #[test]
    fn corner_has_three_neighbors_in_scan_order() {
        let grid = Grid::new(3);
        let corner: Vec<_> = grid.neighbors(0, 0).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0), (1, 1)]);
        let far: Vec<_> = grid.neighbors(2, 2).collect();
        assert_eq!(far, vec![(1, 1), (1, 2), (2, 1)]);
        assert_eq!(grid.neighbors(1, 1).count(), 8);
    }

    #[test]
    fn same_liveness_ignores_color() {
        let a = Grid::with_live_cells(3, &[(1, 1, Some(Color::rgb(255, 0, 0)))]);
        let b = Grid::with_live_cells(3, &[(1, 1, Some(Color::rgb(0, 0, 255)))]);
        assert!(a.same_liveness(&b));
        assert_ne!(a, b);
        assert!(!a.same_liveness(&Grid::new(3)));
        assert!(!Grid::new(3).same_liveness(&Grid::new(4)));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let rows = vec![vec![Cell::DEAD; 2], vec![Cell::DEAD; 3]];
        assert!(Grid::from_rows(rows).is_none());
        let square = Grid::from_rows(vec![vec![Cell::DEAD; 2]; 2]).unwrap();
        assert_eq!(square.size(), 2);
    }

    #[test]
    fn live_cells_are_row_major() {
        let grid = Grid::with_live_cells(4, &[(2, 1, None), (0, 3, None)]);
        let coords: Vec<_> = grid.live_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(coords, vec![(0, 3), (2, 1)]);
        assert_eq!(grid.live_count(), 2);
        assert!(grid.row(4).is_none());
    }
}
