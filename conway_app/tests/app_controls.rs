use conway_app::shortcuts::{BINDINGS, shortcut_for};
use conway_app::{LifeApp, RowStepper, Shortcut, Speed};
use conway_engine::{EngineConfig, Session};
use egui::Key;
use std::time::{Duration, Instant};

fn app(size: usize) -> LifeApp {
    let session = Session::new(size, EngineConfig::with_seed(21)).expect("session");
    LifeApp::new(session, RowStepper::new().expect("runtime"), Duration::from_millis(500))
}

#[test]
fn keys_map_to_shortcuts() {
    assert_eq!(shortcut_for(Key::Space), Some(Shortcut::TogglePlay));
    assert_eq!(shortcut_for(Key::Num2), Some(Shortcut::SetSpeed(Speed::Fast)));
    assert_eq!(shortcut_for(Key::Escape), Some(Shortcut::NewGame));
    assert_eq!(shortcut_for(Key::ArrowLeft), Some(Shortcut::Previous));
    assert_eq!(shortcut_for(Key::Q), None);
    assert_eq!(BINDINGS.len(), 11);
}

#[test]
fn speed_presets_and_clamping() {
    let mut app = app(5);
    app.apply(Shortcut::SetSpeed(Speed::Slow));
    assert_eq!(app.update_interval(), Duration::from_millis(1000));
    app.apply(Shortcut::SetSpeed(Speed::Maximum));
    assert_eq!(app.update_interval(), Duration::from_millis(100));
    app.set_update_interval(Duration::from_millis(10));
    assert_eq!(app.update_interval(), Duration::from_millis(100));
    app.set_update_interval(Duration::from_secs(5));
    assert_eq!(app.update_interval(), Duration::from_millis(1000));
}

#[test]
fn tick_steps_only_when_playing_and_due() {
    let mut app = app(6);
    assert!(app.select_pattern("blinker"));
    app.apply_selected_pattern();

    let later = Instant::now() + Duration::from_secs(2);
    assert!(!app.tick(later));

    app.apply(Shortcut::TogglePlay);
    assert!(app.session().is_playing());
    assert!(!app.tick(Instant::now()));
    assert!(app.tick(later));
    assert_eq!(app.session().generation(), 1);
}

#[test]
fn navigation_shortcuts_walk_history() {
    let mut app = app(6);
    app.select_pattern("Blinker");
    app.apply_selected_pattern();
    app.step();
    app.step();
    assert_eq!(app.session().generation(), 2);

    app.apply(Shortcut::Previous);
    assert_eq!(app.session().generation(), 1);
    app.apply(Shortcut::Next);
    assert_eq!(app.session().generation(), 2);

    app.apply(Shortcut::Next);
    assert_eq!(app.status(), Some("cannot go forward"));
}

#[test]
fn clicking_pauses_and_toggles() {
    let mut app = app(5);
    app.apply(Shortcut::TogglePlay);
    app.click_cell(2, 2);
    assert!(!app.session().is_playing());
    assert!(app.session().grid().is_alive(2, 2));
    app.click_cell(9, 9);
    assert_eq!(app.session().grid().live_count(), 1);
}

#[test]
fn new_game_dialog_resets_to_chosen_size() {
    let mut app = app(5);
    app.click_cell(1, 1);
    app.apply(Shortcut::NewGame);
    assert!(app.new_game_visible());
    app.choose_new_game_size(50);
    app.start_new_game();
    assert!(!app.new_game_visible());
    assert_eq!(app.session().size(), 50);
    assert!(!app.session().grid().has_live_cells());
}

#[test]
fn export_then_import_restores_the_board() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("grid.json");
    let path = path.to_string_lossy().into_owned();

    let mut app = app(5);
    app.click_cell(0, 0);
    app.click_cell(0, 1);
    let saved = app.session().grid().clone();
    app.set_export_path(path.clone());
    app.apply(Shortcut::Export);
    assert!(app.status().is_some_and(|s| s.starts_with("Exported")));

    app.apply(Shortcut::Clean);
    assert!(!app.session().grid().has_live_cells());

    app.apply(Shortcut::Import);
    assert!(app.import_visible());
    app.set_import_path(path);
    app.import();
    assert!(!app.import_visible());
    assert_eq!(app.session().grid(), &saved);
}

#[test]
fn bad_import_keeps_the_board() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"grid\": [[{\"alive\": true}], []]}").expect("write");

    let mut app = app(5);
    app.click_cell(3, 3);
    let before = app.session().grid().clone();
    app.set_import_path(path.to_string_lossy().into_owned());
    app.import();
    assert!(app.status().is_some_and(|s| s.starts_with("Import failed")));
    assert_eq!(app.session().grid(), &before);
}

#[test]
fn help_toggles() {
    let mut app = app(3);
    app.apply(Shortcut::ToggleHelp);
    assert!(app.help_visible());
    app.apply(Shortcut::ToggleHelp);
    assert!(!app.help_visible());
}
