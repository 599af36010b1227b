// convergence.rs - Still-life and oscillator detection

use crate::grid::Grid;
use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Liveness fingerprint of a grid. Colors do not contribute.
pub fn liveness_hash(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.size().hash(&mut hasher);
    for row in grid.rows() {
        for cell in row {
            cell.is_alive().hash(&mut hasher);
        }
    }
    hasher.finish()
}

/// Remembers the last `window` generations and spots a repeat among them.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    recent : VecDeque<u64>,
    window : usize,
}

impl CycleDetector {
    pub fn new(window: usize) -> Self {
        Self {
            recent: VecDeque::with_capacity(window),
            window,
        }
    }

    /// True when `grid` matches one of the remembered generations.
    /// A new fingerprint is remembered, pushing out the oldest once the window is full.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        if self.window == 0 {
            return false;
        }
        let hash = liveness_hash(grid);
        if self.recent.contains(&hash) {
            return true;
        }
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(hash);
        false
    }

    pub fn clear(&mut self) {
        self.recent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;

    fn board(cells: &[(usize, usize)]) -> Grid {
        let cells: Vec<_> = cells.iter().map(|&(r, c)| (r, c, Some(PALETTE[1]))).collect();
        Grid::with_live_cells(5, &cells)
    }

    #[test]
    fn still_life_repeats_immediately() {
        let mut detector = CycleDetector::new(10);
        let block = board(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert!(!detector.observe(&block));
        assert!(detector.observe(&block));
    }

    #[test]
    fn blinker_repeats_after_two() {
        let mut detector = CycleDetector::new(10);
        let horizontal = board(&[(2, 1), (2, 2), (2, 3)]);
        let vertical = board(&[(1, 2), (2, 2), (3, 2)]);
        assert!(!detector.observe(&horizontal));
        assert!(!detector.observe(&vertical));
        assert!(detector.observe(&horizontal));
    }

    #[test]
    fn window_forgets_old_generations() {
        let mut detector = CycleDetector::new(2);
        assert!(!detector.observe(&board(&[(0, 0)])));
        assert!(!detector.observe(&board(&[(1, 1)])));
        assert!(!detector.observe(&board(&[(2, 2)])));
        assert!(!detector.observe(&board(&[(0, 0)])));
    }

    #[test]
    fn colors_do_not_change_the_hash() {
        let red = Grid::with_live_cells(3, &[(1, 1, Some(PALETTE[0]))]);
        let blue = Grid::with_live_cells(3, &[(1, 1, Some(PALETTE[2]))]);
        assert_eq!(liveness_hash(&red), liveness_hash(&blue));
    }

    #[test]
    fn clear_resets_memory() {
        let mut detector = CycleDetector::new(4);
        let grid = board(&[(0, 0)]);
        detector.observe(&grid);
        detector.clear();
        assert!(!detector.observe(&grid));
    }
}
