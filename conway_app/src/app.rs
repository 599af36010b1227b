// app.rs - Desktop driver state: the session plus everything the window needs
//
// Drawing lives in ui.rs. Everything here runs without an egui context so the
// control flow can be exercised directly.

use crate::shortcuts::Shortcut;
use crate::stepper::RowStepper;
use crate::transfer;
use conway_engine::patterns::PATTERNS;
use conway_engine::{Session, StepOutcome};
use egui::Color32;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const GRID_SIZES  : [usize; 6] = [3, 10, 20, 50, 100, 1000];
pub const MIN_SPEED_MS: u64 = 100;
pub const MAX_SPEED_MS: u64 = 1000;

pub struct LifeApp {
    pub(crate) session: Session,
    stepper: RowStepper,

    pub(crate) last_update: Instant,
    pub(crate) update_interval: Duration,
    pub(crate) live_color: Color32,
    pub(crate) dead_color: Color32,
    pub(crate) selected_pattern: usize,
    pub(crate) new_game_size: usize,

    pub(crate) show_help: bool,
    pub(crate) show_new_game: bool,
    pub(crate) show_import: bool,
    pub(crate) import_path: String,
    pub(crate) export_path: String,
    pub(crate) status: Option<String>,
}

impl LifeApp {
    pub fn new(session: Session, stepper: RowStepper, update_interval: Duration) -> Self {
        let new_game_size = session.size();
        Self {
            session,
            stepper,
            last_update: Instant::now(),
            update_interval: clamp_interval(update_interval),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            new_game_size,
            show_help: false,
            show_new_game: false,
            show_import: false,
            import_path: transfer::DEFAULT_EXPORT_FILE.to_string(),
            export_path: transfer::DEFAULT_EXPORT_FILE.to_string(),
            status: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = clamp_interval(interval);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn help_visible(&self) -> bool {
        self.show_help
    }

    pub fn new_game_visible(&self) -> bool {
        self.show_new_game
    }

    pub fn import_visible(&self) -> bool {
        self.show_import
    }

    pub fn set_export_path(&mut self, path: impl Into<String>) {
        self.export_path = path.into();
    }

    pub fn set_import_path(&mut self, path: impl Into<String>) {
        self.import_path = path.into();
    }

    /// Advances one generation if playing and the interval has elapsed.
    /// Returns whether a step was taken.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.session.is_playing() || now.duration_since(self.last_update) < self.update_interval {
            return false;
        }
        self.last_update = now;
        self.step();
        true
    }

    pub fn step(&mut self) -> StepOutcome {
        let stepper = &self.stepper;
        let outcome = self.session.advance_with(|grid, rng| stepper.step(grid, rng));
        match outcome {
            StepOutcome::Extinct => self.status = Some("No live cells left".to_string()),
            StepOutcome::Repeating if !self.session.is_playing() => {
                self.status = Some(format!(
                    "Stopped at generation {}: the board repeats",
                    self.session.generation()
                ));
            }
            _ => {}
        }
        outcome
    }

    pub fn toggle_play(&mut self) {
        self.session.toggle_play();
        if self.session.is_playing() {
            self.last_update = Instant::now();
            self.status = None;
        }
    }

    /// Cell clicks pause a running game first.
    pub fn click_cell(&mut self, row: usize, col: usize) {
        self.session.pause();
        if let Err(err) = self.session.toggle_cell(row, col) {
            debug!(%err, "ignored click");
        }
    }

    pub fn previous(&mut self) {
        self.session.pause();
        if let Err(err) = self.session.go_to_previous() {
            self.status = Some(err.to_string());
        }
    }

    pub fn next(&mut self) {
        self.session.pause();
        if let Err(err) = self.session.go_to_next() {
            self.status = Some(err.to_string());
        }
    }

    pub fn clean(&mut self) {
        self.session.pause();
        self.session.clean();
        self.status = None;
    }

    pub fn start_new_game(&mut self) {
        match self.session.reset(self.new_game_size) {
            Ok(()) => {
                self.show_new_game = false;
                self.status = None;
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub fn choose_new_game_size(&mut self, size: usize) {
        self.new_game_size = size;
    }

    pub fn apply_selected_pattern(&mut self) {
        self.session.pause();
        let Some(pattern) = PATTERNS.get(self.selected_pattern) else {
            return;
        };
        if let Err(err) = self.session.apply_pattern(pattern) {
            self.status = Some(err.to_string());
        }
    }

    pub fn select_pattern(&mut self, name: &str) -> bool {
        match PATTERNS.iter().position(|p| p.name.eq_ignore_ascii_case(name)) {
            Some(index) => {
                self.selected_pattern = index;
                true
            }
            None => false,
        }
    }

    pub fn randomize(&mut self) {
        self.session.pause();
        let seed = rand::random();
        self.session.randomize(seed);
    }

    pub fn export(&mut self) {
        let path = PathBuf::from(&self.export_path);
        self.status = Some(match transfer::export_to(&self.session, &path) {
            Ok(()) => format!("Exported to {}", path.display()),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "export failed");
                format!("Export failed: {err:#}")
            }
        });
    }

    pub fn import(&mut self) {
        let path = PathBuf::from(&self.import_path);
        match transfer::import_from(&mut self.session, &path) {
            Ok(()) => {
                self.show_import = false;
                self.status = Some(format!("Imported {}", path.display()));
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "import failed");
                self.status = Some(format!("Import failed: {err:#}"));
            }
        }
    }

    pub fn apply(&mut self, shortcut: Shortcut) {
        debug!(?shortcut, "shortcut");
        match shortcut {
            Shortcut::ToggleHelp => self.show_help = !self.show_help,
            Shortcut::TogglePlay => self.toggle_play(),
            Shortcut::SetSpeed(speed) => {
                self.update_interval = speed.interval();
                self.status = Some(format!("Speed: {}", speed.label()));
            }
            Shortcut::Export => self.export(),
            Shortcut::Import => self.show_import = true,
            Shortcut::Clean => self.clean(),
            Shortcut::NewGame => {
                self.session.pause();
                self.new_game_size = self.session.size();
                self.show_new_game = true;
            }
            Shortcut::Previous => self.previous(),
            Shortcut::Next => self.next(),
        }
    }

    pub fn selected_pattern_name(&self) -> &'static str {
        PATTERNS.get(self.selected_pattern).map_or("", |p| p.name)
    }

    pub(crate) fn pattern_fits(&self) -> bool {
        PATTERNS
            .get(self.selected_pattern)
            .and_then(|p| p.placed(self.session.size()))
            .is_some()
    }
}

fn clamp_interval(interval: Duration) -> Duration {
    interval.clamp(
        Duration::from_millis(MIN_SPEED_MS),
        Duration::from_millis(MAX_SPEED_MS),
    )
}

