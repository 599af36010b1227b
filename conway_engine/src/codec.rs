// codec.rs - Wire formats: sparse storage form and dense exchange form
//
// Storage keeps only the live cells of each grid so that a 1000x1000 board with
// a handful of gliders stays small. The dense form is what users import and export.

use crate::error::{CodecError, HistoryError, ImportFormatError, PersistenceError};
use crate::grid::{Cell, Color, Grid};
use crate::history::retained_window;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A live cell as `[row, col]` or `[row, col, "#RRGGBB"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveCell {
    pub row   : usize,
    pub col   : usize,
    pub color : Option<Color>,
}

impl Serialize for LiveCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.color.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.row)?;
        seq.serialize_element(&self.col)?;
        if let Some(color) = self.color {
            seq.serialize_element(&color)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for LiveCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LiveCellVisitor;

        impl<'de> Visitor<'de> for LiveCellVisitor {
            type Value = LiveCell;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array [row, col] or [row, col, color]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LiveCell, A::Error> {
                let row = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let col = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                // a missing third element and an explicit null both mean "no color"
                let color: Option<Color> = seq.next_element::<Option<Color>>()?.flatten();
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }
                Ok(LiveCell { row, col, color })
            }
        }

        deserializer.deserialize_seq(LiveCellVisitor)
    }
}

/// Grid reduced to its size and live cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparseGrid {
    pub size       : usize,
    pub live_cells : Vec<LiveCell>,
}

pub fn compress_grid(grid: &Grid) -> SparseGrid {
    SparseGrid {
        size: grid.size(),
        live_cells: grid
            .live_cells()
            .map(|(row, col, cell)| LiveCell { row, col, color: cell.color() })
            .collect(),
    }
}

pub fn decompress_grid(sparse: &SparseGrid) -> Result<Grid, CodecError> {
    if sparse.size == 0 {
        return Err(CodecError::ZeroSize);
    }
    let mut grid = Grid::new(sparse.size);
    for live in &sparse.live_cells {
        let cell = grid.get_mut(live.row, live.col).ok_or(CodecError::CellOutOfBounds {
            row: live.row,
            col: live.col,
            size: sparse.size,
        })?;
        *cell = Cell::live(live.color);
    }
    Ok(grid)
}

/// Stored session state, sparse form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub grid                  : SparseGrid,
    pub generation_count      : usize,
    #[serde(default)]
    pub history               : Vec<SparseGrid>,
    #[serde(default)]
    pub current_history_index : usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub history_offset        : usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Borrowed view of everything a session persists.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub grid       : &'a Grid,
    pub generation : usize,
    pub history    : &'a [Grid],
    pub cursor     : usize,
    pub offset     : usize,
}

/// Owned session state rebuilt from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub grid       : Grid,
    pub generation : usize,
    pub history    : Vec<Grid>,
    pub cursor     : usize,
    pub offset     : usize,
}

/// Encodes the snapshot keeping at most `history_limit` entries (0 keeps all).
/// The oldest go first, but never the entry under the cursor.
pub fn encode_state(
    snapshot: &SessionSnapshot<'_>,
    history_limit: usize,
) -> Result<String, PersistenceError> {
    let cursor = snapshot.cursor.min(snapshot.history.len().saturating_sub(1));
    let (skip, keep) = retained_window(snapshot.history.len(), cursor, history_limit);
    let stored = StoredState {
        grid: compress_grid(snapshot.grid),
        generation_count: snapshot.generation,
        history: snapshot.history.iter().skip(skip).take(keep).map(compress_grid).collect(),
        current_history_index: cursor - skip,
        history_offset: snapshot.offset + skip,
    };
    Ok(serde_json::to_string(&stored)?)
}

/// Parses and validates stored state.
pub fn decode_state(text: &str) -> Result<SessionState, PersistenceError> {
    let stored: StoredState = serde_json::from_str(text)?;
    let grid = decompress_grid(&stored.grid)?;
    let mut history = stored
        .history
        .iter()
        .map(decompress_grid)
        .collect::<Result<Vec<_>, _>>()?;

    // states saved without a timeline start a fresh one at the current grid
    let cursor = if history.is_empty() {
        history.push(grid.clone());
        0
    } else {
        stored.current_history_index
    };

    if cursor >= history.len() {
        return Err(HistoryError::CursorOutOfRange { cursor, len: history.len() }.into());
    }
    if let Some(mismatch) = history.iter().find(|entry| entry.size() != grid.size()) {
        return Err(PersistenceError::GridSizeMismatch {
            expected: mismatch.size(),
            actual: grid.size(),
        });
    }

    Ok(SessionState {
        grid,
        generation: stored.generation_count,
        history,
        cursor,
        offset: stored.history_offset,
    })
}

/// One cell of the dense exchange format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DenseCell {
    pub alive : bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color : Option<Color>,
}

/// `{ "grid": [[{ "alive": .., "color": .. }, ..], ..] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub grid: Vec<Vec<DenseCell>>,
}

impl From<&Grid> for GridSnapshot {
    fn from(grid: &Grid) -> Self {
        Self {
            grid: grid
                .rows()
                .map(|row| {
                    row.iter()
                        .map(|cell| DenseCell { alive: cell.is_alive(), color: cell.color() })
                        .collect()
                })
                .collect(),
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = ImportFormatError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let expected = snapshot.grid.len();
        if expected == 0 {
            return Err(ImportFormatError::EmptyGrid);
        }
        if let Some((row, cells)) = snapshot.grid.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ImportFormatError::NotSquare { row, expected, actual: cells.len() });
        }
        let rows = snapshot
            .grid
            .into_iter()
            .map(|row| row.into_iter().map(|c| Cell::from_parts(c.alive, c.color)).collect())
            .collect();
        Grid::from_rows(rows).ok_or(ImportFormatError::EmptyGrid)
    }
}

/// Dense JSON for export, indented by two spaces.
pub fn export_snapshot(grid: &Grid) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&GridSnapshot::from(grid))
}

/// Parses dense JSON. Nothing is returned unless the whole grid is well formed.
pub fn import_snapshot(text: &str) -> Result<Grid, ImportFormatError> {
    let snapshot: GridSnapshot = serde_json::from_str(text)?;
    Grid::try_from(snapshot)
}
