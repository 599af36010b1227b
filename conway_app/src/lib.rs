// lib.rs - Desktop front end for the colored Game of Life engine

pub mod app;
pub mod shortcuts;
pub mod stepper;
pub mod transfer;
mod ui;

pub use app::LifeApp;
pub use shortcuts::{Shortcut, Speed};
pub use stepper::RowStepper;
