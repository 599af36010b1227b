// ui.rs - eframe front end for LifeApp

use crate::app::{GRID_SIZES, LifeApp, MAX_SPEED_MS, MIN_SPEED_MS};
use crate::shortcuts::{self, BINDINGS};
use conway_engine::patterns::PATTERNS;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

const MIN_STROKE_CELL: f32 = 4.0;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(Instant::now());

        // Typing a file path must not trigger shortcuts
        if !ctx.wants_keyboard_input() {
            for shortcut in ctx.input(shortcuts::pressed) {
                self.apply(shortcut);
            }
        }

        self.help_window(ctx);
        self.new_game_window(ctx);
        self.import_window(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);
            ui.separator();
            self.settings(ui);
            ui.separator();

            if let Some(status) = &self.status {
                ui.label(status.as_str());
                ui.separator();
            }

            self.board(ui);
            ui.separator();
            self.statistics(ui);
        });

        if self.session.is_playing() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }
    }
}

impl LifeApp {
    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.session.is_playing() { "⏸ Pause" } else { "▶ Play" };
            if ui.button(button_text).clicked() {
                self.toggle_play();
            }

            if ui.add_enabled(self.session.can_go_back(), egui::Button::new("⏮ Previous")).clicked() {
                self.previous();
            }
            if ui.add_enabled(self.session.can_go_forward(), egui::Button::new("Next ⏭")).clicked() {
                self.next();
            }

            if ui.button("🧹 Clean").clicked() {
                self.clean();
            }
            if ui.button("🎲 Random").clicked() {
                self.randomize();
            }

            ui.separator();

            if ui.button("New game").clicked() {
                self.apply(shortcuts::Shortcut::NewGame);
            }
            if ui.button("Import").clicked() {
                self.show_import = true;
            }
            if ui.button("Export").clicked() {
                self.export();
            }
            if ui.button("Shortcuts").clicked() {
                self.show_help = !self.show_help;
            }
        });
    }

    fn settings(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(self.selected_pattern_name())
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.add_enabled(self.pattern_fits(), egui::Button::new("Apply Pattern")).clicked() {
                self.apply_selected_pattern();
            }

            ui.separator();

            ui.label("Speed:");
            let mut millis = self.update_interval.as_millis() as u64;
            let slider = egui::Slider::new(&mut millis, MIN_SPEED_MS..=MAX_SPEED_MS).suffix(" ms");
            if ui.add(slider).changed() {
                self.set_update_interval(Duration::from_millis(millis));
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let size = self.session.size();
        let available = ui.available_size();
        let side = available.x.min(available.y - 40.0).max(120.0);
        let cell = side / size as f32;
        let gap = if cell >= MIN_STROKE_CELL { 0.5 } else { 0.0 };

        let (response, painter) = ui.allocate_painter(Vec2::splat(side), egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, self.dead_color);

        // Only live cells are painted over the dead background
        let grid = self.session.grid();
        for (row, col, c) in grid.live_cells() {
            let min = Pos2::new(origin.x + col as f32 * cell, origin.y + row as f32 * cell);
            let rect = Rect::from_min_size(min, Vec2::splat(cell - gap));
            let color = c
                .color()
                .map_or(self.live_color, |rgb| Color32::from_rgb(rgb.r, rgb.g, rgb.b));
            painter.rect_filled(rect, 0.0, color);
        }

        if cell >= MIN_STROKE_CELL {
            let stroke = Stroke::new(0.2, Color32::from_gray(60));
            for i in 0..=size {
                let offset = i as f32 * cell;
                painter.line_segment(
                    [Pos2::new(origin.x + offset, origin.y), Pos2::new(origin.x + offset, origin.y + side)],
                    stroke,
                );
                painter.line_segment(
                    [Pos2::new(origin.x, origin.y + offset), Pos2::new(origin.x + side, origin.y + offset)],
                    stroke,
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let col = ((pos.x - origin.x) / cell).floor();
                let row = ((pos.y - origin.y) / cell).floor();
                if row >= 0.0 && col >= 0.0 {
                    self.click_cell(row as usize, col as usize);
                }
            }
        }
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let grid = self.session.grid();
        let total = grid.size() * grid.size();
        let live = grid.live_count();
        let history = self.session.history();

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", self.session.generation()));
            ui.label(format!("History: {}/{}", history.cursor() + 1, history.len()));
            ui.separator();
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }

    fn help_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_help;
        egui::Window::new("Keyboard Shortcuts")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("shortcut_grid").striped(true).show(ui, |ui| {
                    for &(_, shortcut) in BINDINGS {
                        let (key, action) = shortcut.describe();
                        ui.monospace(key);
                        ui.label(action);
                        ui.end_row();
                    }
                });
            });
        self.show_help = open && self.show_help;
    }

    fn new_game_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_new_game;
        egui::Window::new("New Game")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Grid size:");
                egui::ComboBox::from_id_source("grid_size_selector")
                    .selected_text(format!("{0} x {0}", self.new_game_size))
                    .show_ui(ui, |ui| {
                        for size in GRID_SIZES {
                            ui.selectable_value(&mut self.new_game_size, size, format!("{size} x {size}"));
                        }
                    });
                ui.horizontal(|ui| {
                    if ui.button("Start").clicked() {
                        self.start_new_game();
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_new_game = false;
                    }
                });
            });
        self.show_new_game = open && self.show_new_game;
    }

    fn import_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_import;
        egui::Window::new("Import Grid")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Path to a JSON grid file:");
                ui.text_edit_singleline(&mut self.import_path);
                ui.horizontal(|ui| {
                    if ui.button("Import").clicked() {
                        self.import();
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_import = false;
                    }
                });
                ui.separator();
                ui.label("Export path:");
                ui.text_edit_singleline(&mut self.export_path);
            });
        self.show_import = open && self.show_import;
    }
}
