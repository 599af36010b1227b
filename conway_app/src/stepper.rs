// stepper.rs - Next generation computed with one tokio task per row
//
// Rows only read the current grid, so every row task runs on its own and the
// finished rows are slotted back by index. Each row gets its own seed so births
// do not contend for one rng.

use conway_engine::{Cell, Grid, rules};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::warn;

pub struct RowStepper {
    runtime: Runtime,
}

impl RowStepper {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self { runtime: Runtime::new()? })
    }

    /// Same liveness as `rules::next_generation`; birth colors come from the
    /// per-row rngs. Falls back to the sequential step if a row task fails.
    pub fn step(&self, grid: &Grid, rng: &mut SmallRng) -> Grid {
        let size = grid.size();
        let shared = Arc::new(grid.clone());
        let seeds: Vec<u64> = (0..size).map(|row| rng.next_u64() ^ row as u64).collect();

        let rows = self.runtime.block_on(async {
            // Spawn every row at once, then collect them with their row index
            let handles: Vec<_> = seeds
                .into_iter()
                .enumerate()
                .map(|(row, seed)| tokio::spawn(process_row(row, Arc::clone(&shared), seed)))
                .collect();

            let mut rows = vec![Vec::new(); size];
            for handle in handles {
                match handle.await {
                    Ok((row, cells)) => rows[row] = cells,
                    Err(err) => {
                        warn!(%err, "row task failed");
                        return None;
                    }
                }
            }
            Some(rows)
        });

        rows.and_then(Grid::from_rows)
            .unwrap_or_else(|| rules::next_generation(grid, rng))
    }
}

async fn process_row(row: usize, grid: Arc<Grid>, seed: u64) -> (usize, Vec<Cell>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let cells = rules::next_row(&grid, row, &mut rng);
    tokio::task::yield_now().await;
    (row, cells)
}
