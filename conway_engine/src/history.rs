// history.rs - Navigable generation timeline

use crate::error::{HistoryError, NavigationError};
use crate::grid::Grid;
use tracing::debug;

/// What a commit did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The grid matched the target entry; at most the cursor moved.
    Unchanged,
    /// Written as a new tail entry.
    Appended,
    /// Overwrote the entry at this index.
    Replaced(usize),
    /// Written after the cursor, discarding this many later entries.
    Branched { discarded: usize },
}

/// Grid snapshots with a cursor on the active one.
///
/// Entries are compared by liveness only. The log never holds more than
/// `limit` entries (0 means unbounded); evicted entries are counted in
/// `offset` so entry `i` always belongs to generation `offset + i`.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries : Vec<Grid>,
    cursor  : usize,
    offset  : usize,
    limit   : usize,
}

/// Which part of a `len`-entry log survives a cap of `limit`: the first
/// `front` entries go, then `keep` entries are kept. The cursor's entry is
/// always kept; when the oldest entries alone cannot make room, the newest go.
pub(crate) fn retained_window(len: usize, cursor: usize, limit: usize) -> (usize, usize) {
    if limit == 0 || len <= limit {
        return (0, len);
    }
    let front = (len - limit).min(cursor);
    (front, limit.min(len - front))
}

impl HistoryLog {
    pub fn new(initial: Grid, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            offset: 0,
            limit,
        }
    }

    /// Rebuilds a log from stored parts, trimming it to `limit`.
    pub fn restore(
        mut entries: Vec<Grid>,
        cursor: usize,
        offset: usize,
        limit: usize,
    ) -> Result<Self, HistoryError> {
        let Some(first) = entries.first() else {
            return Err(HistoryError::Empty);
        };
        if cursor >= entries.len() {
            return Err(HistoryError::CursorOutOfRange { cursor, len: entries.len() });
        }
        let expected = first.size();
        if let Some((index, grid)) = entries.iter().enumerate().find(|(_, g)| g.size() != expected) {
            return Err(HistoryError::SizeMismatch { index, expected, actual: grid.size() });
        }

        let len = entries.len();
        let (front, keep) = retained_window(len, cursor, limit);
        entries.drain(..front);
        entries.truncate(keep);
        if keep < len {
            debug!(front, dropped = len - keep, "trimmed restored history to the limit");
        }
        Ok(Self { entries, cursor: cursor - front, offset: offset + front, limit })
    }

    /// Records `grid` as generation `generation`.
    ///
    /// At the tail, or while playing, the entry for that generation is written
    /// (or appended when the generation lies past the tail). From the middle of
    /// the timeline a changed grid drops the abandoned future and becomes the
    /// new tail.
    pub fn commit(&mut self, grid: &Grid, generation: usize, playing: bool) -> CommitOutcome {
        let outcome = if playing || self.at_tail() {
            self.commit_at_generation(grid, generation)
        } else {
            self.commit_divergent(grid)
        };
        if outcome != CommitOutcome::Unchanged {
            self.enforce_limit();
        }
        debug!(?outcome, generation, cursor = self.cursor, len = self.entries.len(), "history commit");
        outcome
    }

    fn commit_at_generation(&mut self, grid: &Grid, generation: usize) -> CommitOutcome {
        let slot = generation
            .checked_sub(self.offset)
            .filter(|&slot| slot < self.entries.len());

        match slot {
            Some(slot) if self.entries[slot].same_liveness(grid) => {
                self.cursor = slot;
                CommitOutcome::Unchanged
            }
            Some(slot) => {
                self.entries[slot] = grid.clone();
                self.cursor = slot;
                CommitOutcome::Replaced(slot)
            }
            None if self.tail().same_liveness(grid) => {
                self.cursor = self.entries.len() - 1;
                CommitOutcome::Unchanged
            }
            None => {
                self.entries.push(grid.clone());
                self.cursor = self.entries.len() - 1;
                CommitOutcome::Appended
            }
        }
    }

    fn commit_divergent(&mut self, grid: &Grid) -> CommitOutcome {
        if self.current().same_liveness(grid) {
            return CommitOutcome::Unchanged;
        }
        let discarded = self.entries.len() - self.cursor - 1;
        self.entries.truncate(self.cursor + 1);
        self.entries.push(grid.clone());
        self.cursor += 1;
        CommitOutcome::Branched { discarded }
    }

    fn enforce_limit(&mut self) {
        if self.limit == 0 || self.entries.len() <= self.limit {
            return;
        }
        let excess = self.entries.len() - self.limit;
        self.entries.drain(..excess);
        self.cursor = self.cursor.saturating_sub(excess);
        self.offset += excess;
        debug!(excess, offset = self.offset, "evicted oldest history entries");
    }

    pub fn go_to_previous(&mut self) -> Result<&Grid, NavigationError> {
        if !self.can_go_back() {
            return Err(NavigationError::CannotGoBack);
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    pub fn go_to_next(&mut self) -> Result<&Grid, NavigationError> {
        if !self.can_go_forward() {
            return Err(NavigationError::CannotGoForward);
        }
        self.cursor += 1;
        Ok(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Moving forward from an empty board is refused even when later entries exist.
    pub fn can_go_forward(&self) -> bool {
        !self.at_tail() && self.current().has_live_cells()
    }

    /// Replaces the whole timeline with a single entry.
    pub fn reset(&mut self, grid: Grid) {
        self.entries = vec![grid];
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn current(&self) -> &Grid {
        &self.entries[self.cursor]
    }

    pub fn tail(&self) -> &Grid {
        &self.entries[self.entries.len() - 1]
    }

    pub fn at_tail(&self) -> bool {
        self.cursor + 1 == self.entries.len()
    }

    pub fn entries(&self) -> &[Grid] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Generation number of the entry under the cursor.
    pub fn current_generation(&self) -> usize {
        self.offset + self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: usize, cells: &[(usize, usize)]) -> Grid {
        let cells: Vec<_> = cells.iter().map(|&(r, c)| (r, c, None)).collect();
        Grid::with_live_cells(size, &cells)
    }

    #[test]
    fn fresh_log_cannot_navigate() {
        let mut log = HistoryLog::new(Grid::new(3), 50);
        assert_eq!(log.go_to_previous().unwrap_err(), NavigationError::CannotGoBack);
        assert_eq!(log.go_to_next().unwrap_err(), NavigationError::CannotGoForward);
    }

    #[test]
    fn edit_at_generation_zero_overwrites_slot_zero() {
        let mut log = HistoryLog::new(Grid::new(3), 50);
        let outcome = log.commit(&board(3, &[(1, 1)]), 0, false);
        assert_eq!(outcome, CommitOutcome::Replaced(0));
        assert_eq!(log.len(), 1);
        assert!(log.current().is_alive(1, 1));
    }

    #[test]
    fn new_generation_appends() {
        let mut log = HistoryLog::new(board(3, &[(1, 1)]), 50);
        assert_eq!(log.commit(&Grid::new(3), 1, false), CommitOutcome::Appended);
        assert_eq!(log.cursor(), 1);
        assert_eq!(log.current_generation(), 1);
    }

    #[test]
    fn identical_commit_is_a_no_op() {
        let mut log = HistoryLog::new(board(3, &[(1, 1)]), 50);
        assert_eq!(log.commit(&board(3, &[(1, 1)]), 0, false), CommitOutcome::Unchanged);
        assert_eq!(log.commit(&board(3, &[(1, 1)]), 1, false), CommitOutcome::Unchanged);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn divergent_edit_truncates_future() {
        let mut log = HistoryLog::new(board(4, &[(0, 0)]), 50);
        log.commit(&board(4, &[(0, 1)]), 1, false);
        log.commit(&board(4, &[(0, 2)]), 2, false);
        log.commit(&board(4, &[(0, 3)]), 3, false);
        log.go_to_previous().unwrap();
        log.go_to_previous().unwrap();
        assert_eq!(log.cursor(), 1);

        let outcome = log.commit(&board(4, &[(3, 3)]), 1, false);
        assert_eq!(outcome, CommitOutcome::Branched { discarded: 2 });
        assert_eq!(log.len(), 3);
        assert!(log.at_tail());
        assert!(log.current().is_alive(3, 3));
    }

    #[test]
    fn unchanged_edit_mid_history_keeps_future() {
        let mut log = HistoryLog::new(board(4, &[(0, 0)]), 50);
        log.commit(&board(4, &[(0, 1)]), 1, false);
        log.go_to_previous().unwrap();
        assert_eq!(log.commit(&board(4, &[(0, 0)]), 0, false), CommitOutcome::Unchanged);
        assert_eq!(log.len(), 2);
        assert!(log.can_go_forward());
    }

    #[test]
    fn playing_from_the_middle_reuses_matching_slots() {
        let mut log = HistoryLog::new(board(4, &[(0, 0)]), 50);
        log.commit(&board(4, &[(0, 1)]), 1, false);
        log.commit(&board(4, &[(0, 2)]), 2, false);
        log.go_to_previous().unwrap();
        log.go_to_previous().unwrap();

        assert_eq!(log.commit(&board(4, &[(0, 1)]), 1, true), CommitOutcome::Unchanged);
        assert_eq!(log.cursor(), 1);
        assert_eq!(log.commit(&board(4, &[(1, 1)]), 2, true), CommitOutcome::Replaced(2));
        assert_eq!(log.cursor(), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn generation_past_the_tail_extends_without_gaps() {
        let mut log = HistoryLog::new(board(3, &[(0, 0)]), 50);
        assert_eq!(log.commit(&board(3, &[(2, 2)]), 9, false), CommitOutcome::Appended);
        assert_eq!(log.len(), 2);
        assert_eq!(log.cursor(), 1);
    }

    #[test]
    fn forward_from_empty_entry_is_refused() {
        let mut log = HistoryLog::new(board(3, &[(1, 1)]), 50);
        log.commit(&Grid::new(3), 1, false);
        log.commit(&board(3, &[(0, 0)]), 2, false);
        log.go_to_previous().unwrap();
        assert!(!log.current().has_live_cells());
        assert_eq!(log.go_to_next().unwrap_err(), NavigationError::CannotGoForward);
    }

    #[test]
    fn cap_evicts_oldest_and_tracks_offset() {
        let mut log = HistoryLog::new(board(8, &[(0, 0)]), 5);
        for generation in 1..=7 {
            log.commit(&board(8, &[(generation, generation)]), generation, false);
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.offset(), 3);
        assert_eq!(log.cursor(), 4);
        assert_eq!(log.current_generation(), 7);
        assert!(log.entries()[0].is_alive(3, 3));
    }

    #[test]
    fn restore_validates_parts() {
        assert_eq!(HistoryLog::restore(vec![], 0, 0, 50).unwrap_err(), HistoryError::Empty);
        assert_eq!(
            HistoryLog::restore(vec![Grid::new(3)], 1, 0, 50).unwrap_err(),
            HistoryError::CursorOutOfRange { cursor: 1, len: 1 }
        );
        assert_eq!(
            HistoryLog::restore(vec![Grid::new(3), Grid::new(4)], 0, 0, 50).unwrap_err(),
            HistoryError::SizeMismatch { index: 1, expected: 3, actual: 4 }
        );
        let log = HistoryLog::restore(vec![Grid::new(3); 6], 5, 0, 4).unwrap();
        assert_eq!((log.len(), log.cursor(), log.offset()), (4, 3, 2));
    }

    #[test]
    fn retained_window_never_drops_the_cursor() {
        assert_eq!(retained_window(6, 5, 0), (0, 6));
        assert_eq!(retained_window(6, 5, 10), (0, 6));
        assert_eq!(retained_window(6, 5, 4), (2, 4));
        assert_eq!(retained_window(6, 1, 4), (1, 4));
        assert_eq!(retained_window(6, 0, 4), (0, 4));
    }

    #[test]
    fn restore_with_early_cursor_cuts_the_newest_entries() {
        let entries: Vec<_> = (0..8).map(|i| board(8, &[(i, i)])).collect();
        let log = HistoryLog::restore(entries, 1, 3, 4).unwrap();
        assert_eq!((log.len(), log.cursor(), log.offset()), (4, 0, 4));
        assert!(log.current().is_alive(1, 1));
        assert_eq!(log.current_generation(), 4);
        assert!(log.tail().is_alive(4, 4));
    }
}
