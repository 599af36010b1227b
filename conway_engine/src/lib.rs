// lib.rs - Conway's Game of Life engine with colored cells and a navigable history
//
// The engine knows nothing about drawing or input. A driver owns a `Session`,
// calls its edit/step/navigate methods, and reads `Session::grid` to render.

pub mod codec;
pub mod color;
pub mod config;
pub mod convergence;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod persistence;
pub mod rules;
pub mod session;
pub mod store;

pub use codec::{GridSnapshot, SessionSnapshot, SessionState, SparseGrid};
pub use config::EngineConfig;
pub use error::{
    CodecError, ColorParseError, HistoryError, ImportFormatError, NavigationError,
    PersistenceError, SessionError, StoreError,
};
pub use grid::{Cell, Color, Grid};
pub use history::{CommitOutcome, HistoryLog};
pub use persistence::{NullPersistence, SessionPersistence, StorePersistence};
pub use session::{Session, StepOutcome};
pub use store::{FileStore, KeyValueStore, MemoryStore};
