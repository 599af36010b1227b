// shortcuts.rs - Keyboard bindings

use egui::{InputState, Key};
use std::time::Duration;

/// Preset play speeds selectable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Slow,
    Fast,
    Maximum,
}

impl Speed {
    pub fn interval(self) -> Duration {
        match self {
            Speed::Slow    => Duration::from_millis(1000),
            Speed::Fast    => Duration::from_millis(200),
            Speed::Maximum => Duration::from_millis(100),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Slow    => "Slow",
            Speed::Fast    => "Fast",
            Speed::Maximum => "Maximum",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleHelp,
    TogglePlay,
    SetSpeed(Speed),
    Export,
    Import,
    Clean,
    NewGame,
    Previous,
    Next,
}

pub const BINDINGS: &[(Key, Shortcut)] = &[
    (Key::K,          Shortcut::ToggleHelp),
    (Key::Space,      Shortcut::TogglePlay),
    (Key::Num1,       Shortcut::SetSpeed(Speed::Slow)),
    (Key::Num2,       Shortcut::SetSpeed(Speed::Fast)),
    (Key::Num3,       Shortcut::SetSpeed(Speed::Maximum)),
    (Key::E,          Shortcut::Export),
    (Key::I,          Shortcut::Import),
    (Key::C,          Shortcut::Clean),
    (Key::Escape,     Shortcut::NewGame),
    (Key::ArrowLeft,  Shortcut::Previous),
    (Key::ArrowRight, Shortcut::Next),
];

pub fn shortcut_for(key: Key) -> Option<Shortcut> {
    BINDINGS.iter().find(|(k, _)| *k == key).map(|&(_, s)| s)
}

/// Shortcuts whose key went down this frame, in binding order.
pub fn pressed(input: &InputState) -> Vec<Shortcut> {
    BINDINGS
        .iter()
        .filter(|(key, _)| input.key_pressed(*key))
        .map(|&(_, s)| s)
        .collect()
}

impl Shortcut {
    /// Key caption and description for the help window.
    pub fn describe(self) -> (&'static str, &'static str) {
        match self {
            Shortcut::ToggleHelp                   => ("K", "Show or hide this list"),
            Shortcut::TogglePlay                   => ("Space", "Play/Pause the game"),
            Shortcut::SetSpeed(Speed::Slow)        => ("1", "Set speed to Slow"),
            Shortcut::SetSpeed(Speed::Fast)        => ("2", "Set speed to Fast"),
            Shortcut::SetSpeed(Speed::Maximum)     => ("3", "Set speed to Maximum"),
            Shortcut::Export                       => ("E", "Export the grid"),
            Shortcut::Import                       => ("I", "Open the import dialog"),
            Shortcut::Clean                        => ("C", "Clean the grid"),
            Shortcut::NewGame                      => ("Esc", "Open the new game dialog"),
            Shortcut::Previous                     => ("←", "Go to previous generation"),
            Shortcut::Next                         => ("→", "Go to next generation"),
        }
    }
}
