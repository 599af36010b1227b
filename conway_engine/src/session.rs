// session.rs - One game: grid, generation counter, history and persistence
//
// Every mutation ends in `commit` (edits and generations) or `restart`
// (reset, clean, import, seeding). Both leave `history.current()` matching the
// active grid and hand a snapshot to the persistence sink.

use crate::codec::{self, SessionSnapshot, SessionState};
use crate::color::determine_cell_color;
use crate::config::EngineConfig;
use crate::convergence::CycleDetector;
use crate::error::{NavigationError, SessionError};
use crate::grid::{Cell, Grid};
use crate::history::{CommitOutcome, HistoryLog};
use crate::patterns::{self, Pattern};
use crate::persistence::{NullPersistence, SessionPersistence};
use crate::rules;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::fmt;
use tracing::{debug, info, warn};

/// Result of asking for the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new generation was committed.
    Advanced,
    /// A new generation was committed and it repeats a recent one.
    Repeating,
    /// No live cells; nothing changed.
    Extinct,
}

pub struct Session {
    grid        : Grid,
    generation  : usize,
    history     : HistoryLog,
    playing     : bool,
    cycles      : CycleDetector,
    rng         : SmallRng,
    persistence : Box<dyn SessionPersistence>,
    config      : EngineConfig,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("size", &self.grid.size())
            .field("generation", &self.generation)
            .field("cursor", &self.history.cursor())
            .field("history_len", &self.history.len())
            .field("playing", &self.playing)
            .finish()
    }
}

impl Session {
    /// Empty board of `size`, nothing persisted.
    pub fn new(size: usize, config: EngineConfig) -> Result<Self, SessionError> {
        Self::with_persistence(size, config, Box::new(NullPersistence))
    }

    /// Empty board of `size`; the initial state is saved right away.
    pub fn with_persistence(
        size: usize,
        config: EngineConfig,
        persistence: Box<dyn SessionPersistence>,
    ) -> Result<Self, SessionError> {
        if size == 0 {
            return Err(SessionError::InvalidSize);
        }
        let grid = Grid::new(size);
        let mut session = Self::assemble(
            grid.clone(),
            0,
            HistoryLog::new(grid, config.history_limit),
            config,
            persistence,
        );
        session.persist();
        Ok(session)
    }

    /// Picks up the saved game if there is one, otherwise starts an empty board.
    pub fn resume(
        default_size: usize,
        config: EngineConfig,
        mut persistence: Box<dyn SessionPersistence>,
    ) -> Result<Self, SessionError> {
        match persistence.load() {
            Some(state) => {
                info!(
                    size = state.grid.size(),
                    generation = state.generation,
                    history = state.history.len(),
                    "resuming saved session"
                );
                Ok(Self::from_state(state, config, persistence))
            }
            None => Self::with_persistence(default_size, config, persistence),
        }
    }

    /// Rebuilds a session from loaded state. A timeline whose cursor entry
    /// does not match the current grid is replaced by one holding only that grid.
    pub fn from_state(
        state: SessionState,
        config: EngineConfig,
        persistence: Box<dyn SessionPersistence>,
    ) -> Self {
        let history = HistoryLog::restore(state.history, state.cursor, state.offset, config.history_limit)
            .ok()
            .filter(|log| log.current().same_liveness(&state.grid))
            .unwrap_or_else(|| {
                warn!(generation = state.generation, "saved history does not match the grid, starting a new one");
                HistoryLog::new(state.grid.clone(), config.history_limit)
            });
        Self::assemble(state.grid, state.generation, history, config, persistence)
    }

    fn assemble(
        grid: Grid,
        generation: usize,
        history: HistoryLog,
        config: EngineConfig,
        persistence: Box<dyn SessionPersistence>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            grid,
            generation,
            history,
            playing: false,
            cycles: CycleDetector::new(config.cycle_window),
            rng,
            persistence,
            config,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            grid: &self.grid,
            generation: self.generation,
            history: self.history.entries(),
            cursor: self.history.cursor(),
            offset: self.history.offset(),
        }
    }

    // -- play state ---------------------------------------------------------

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    // -- edits --------------------------------------------------------------

    /// Flips one cell. A cell coming alive takes its color from its live neighbors.
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        let alive = self.cell(row, col)?.is_alive();
        self.write_cell(row, col, !alive);
        Ok(())
    }

    /// Sets one cell. An already-live cell keeps its color.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), SessionError> {
        if self.cell(row, col)?.is_alive() == alive {
            return Ok(());
        }
        self.write_cell(row, col, alive);
        Ok(())
    }

    fn cell(&self, row: usize, col: usize) -> Result<Cell, SessionError> {
        self.grid.get(row, col).copied().ok_or(SessionError::CellOutOfBounds {
            row,
            col,
            size: self.grid.size(),
        })
    }

    fn write_cell(&mut self, row: usize, col: usize, alive: bool) {
        let cell = if alive {
            // manual edits have no previous generation to look at
            Cell::colored(determine_cell_color(&self.grid, row, col, None, &mut self.rng))
        } else {
            Cell::DEAD
        };
        let mut next = self.grid.clone();
        if let Some(slot) = next.get_mut(row, col) {
            *slot = cell;
        }
        self.cycles.clear();
        self.commit(next, self.generation);
    }

    // -- time ---------------------------------------------------------------

    pub fn next_generation(&mut self) -> StepOutcome {
        self.advance_with(|grid, rng| rules::next_generation(grid, rng))
    }

    /// Advances using a caller-supplied step function, for drivers that compute
    /// the next grid their own way. `step` must return a grid of the same size.
    pub fn advance_with<F>(&mut self, step: F) -> StepOutcome
    where
        F: FnOnce(&Grid, &mut SmallRng) -> Grid,
    {
        if !self.grid.has_live_cells() {
            if self.config.stop_on_cycle {
                self.playing = false;
            }
            return StepOutcome::Extinct;
        }

        let mut next = step(&self.grid, &mut self.rng);
        if next.size() != self.grid.size() {
            warn!(expected = self.grid.size(), actual = next.size(), "step returned a resized grid");
            next = rules::next_generation(&self.grid, &mut self.rng);
        }
        let repeating = self.cycles.observe(&next);
        self.generation += 1;
        self.commit(next, self.generation);

        if repeating {
            debug!(generation = self.generation, "board repeats a recent generation");
            if self.config.stop_on_cycle {
                self.playing = false;
            }
            StepOutcome::Repeating
        } else {
            StepOutcome::Advanced
        }
    }

    // -- history ------------------------------------------------------------

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn go_to_previous(&mut self) -> Result<(), NavigationError> {
        let grid = self.history.go_to_previous()?.clone();
        self.show_history_entry(grid);
        Ok(())
    }

    pub fn go_to_next(&mut self) -> Result<(), NavigationError> {
        let grid = self.history.go_to_next()?.clone();
        self.show_history_entry(grid);
        Ok(())
    }

    fn show_history_entry(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = self.history.current_generation();
        self.cycles.clear();
        debug!(generation = self.generation, cursor = self.history.cursor(), "moved through history");
        self.persist();
    }

    // -- whole-board replacement ---------------------------------------------

    /// Empty board of a new size, paused, history restarted.
    pub fn reset(&mut self, size: usize) -> Result<(), SessionError> {
        if size == 0 {
            return Err(SessionError::InvalidSize);
        }
        self.playing = false;
        info!(size, "new game");
        self.restart(Grid::new(size));
        Ok(())
    }

    /// Kills every cell, keeps the size, history restarted.
    pub fn clean(&mut self) {
        info!(size = self.grid.size(), "cleaning grid");
        self.restart(self.grid.cleared());
    }

    /// Replaces the board with a dense snapshot. On error nothing changes.
    pub fn import_snapshot(&mut self, text: &str) -> Result<(), SessionError> {
        let grid = codec::import_snapshot(text)?;
        info!(size = grid.size(), live = grid.live_count(), "imported grid");
        self.playing = false;
        self.restart(grid);
        Ok(())
    }

    pub fn export_snapshot(&self) -> Result<String, SessionError> {
        codec::export_snapshot(&self.grid).map_err(SessionError::Export)
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) -> Result<(), SessionError> {
        let size = self.grid.size();
        let grid = pattern
            .to_grid(size, &mut self.rng)
            .ok_or(SessionError::PatternTooLarge {
                name: pattern.name,
                needed: pattern.extent(),
                size,
            })?;
        info!(pattern = pattern.name, "applied pattern");
        self.restart(grid);
        Ok(())
    }

    pub fn randomize(&mut self, seed: u64) {
        info!(seed, "random fill");
        self.restart(patterns::random_grid(self.grid.size(), seed));
    }

    // -- commit path ----------------------------------------------------------

    fn commit(&mut self, grid: Grid, generation: usize) {
        let outcome = self.history.commit(&grid, generation, self.playing);
        if let CommitOutcome::Branched { discarded } = outcome {
            debug!(discarded, "edit replaced the abandoned future");
        }
        self.grid = grid;
        self.generation = generation;
        self.persist();
    }

    fn restart(&mut self, grid: Grid) {
        self.history.reset(grid.clone());
        self.cycles.clear();
        self.grid = grid;
        self.generation = 0;
        self.persist();
    }

    fn persist(&mut self) {
        let snapshot = SessionSnapshot {
            grid: &self.grid,
            generation: self.generation,
            history: self.history.entries(),
            cursor: self.history.cursor(),
            offset: self.history.offset(),
        };
        self.persistence.save(&snapshot);
    }
}
