// main.rs - Colored Conway's Game of Life with a navigable, persisted history

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway_app::{LifeApp, RowStepper};
use conway_engine::config::DEFAULT_HISTORY_LIMIT;
use conway_engine::{EngineConfig, FileStore, NullPersistence, Session, SessionPersistence, StorePersistence};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "conway_app", version, about = "Colored Game of Life with history")]
struct Args {
    /// Side length of a new board. A saved game keeps its own size.
    #[arg(long, default_value_t = 20)]
    size: usize,

    /// Directory holding the saved game.
    #[arg(long, default_value = ".conway")]
    state_dir: PathBuf,

    /// Milliseconds between generations while playing (100-1000).
    #[arg(long, default_value_t = 500)]
    speed_ms: u64,

    /// Seed for cell colors; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Most generations kept in history; 0 keeps everything.
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Neither load nor save the game.
    #[arg(long)]
    no_persist: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = EngineConfig {
        history_limit: args.history_limit,
        rng_seed: args.seed,
        ..EngineConfig::default()
    };

    let persistence: Box<dyn SessionPersistence> = if args.no_persist {
        Box::new(NullPersistence)
    } else {
        info!(dir = %args.state_dir.display(), "using saved state");
        Box::new(StorePersistence::new(FileStore::new(&args.state_dir), &config))
    };

    let session = Session::resume(args.size, config, persistence).context("starting session")?;
    let stepper = RowStepper::new().context("starting row workers")?;
    let app = LifeApp::new(session, stepper, Duration::from_millis(args.speed_ms));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
