// transfer.rs - Dense snapshot files on disk

use anyhow::{Context, Result};
use conway_engine::Session;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_EXPORT_FILE: &str = "game-of-life-grid.json";

pub fn export_to(session: &Session, path: &Path) -> Result<()> {
    let text = session.export_snapshot()?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), generation = session.generation(), "exported grid");
    Ok(())
}

/// Loads a snapshot into the session. A file that cannot be read or parsed
/// leaves the session untouched.
pub fn import_from(session: &mut Session, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    session
        .import_snapshot(&text)
        .with_context(|| format!("importing {}", path.display()))?;
    Ok(())
}
