//! DevTyping binary: code typing practice in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Practice the last pasted text (or the built-in sample)
//! devtyping
//!
//! # Practice a source file
//! devtyping --file src/lib.rs
//!
//! # Verbose logs, no history
//! RUST_LOG=devtyping=debug devtyping --no-history
//! ```

use clap::Parser;
use devtyping::{initial_text, App, Engine, HistoryStore, TrainerConfig};
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Code typing trainer
#[derive(Parser, Debug)]
#[command(name = "devtyping")]
#[command(about = "Practice typing source code in the terminal")]
#[command(version)]
struct Args {
    /// Text file to practice on
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Session history file (JSON)
    #[arg(long, default_value = "devtyping.json")]
    history: PathBuf,

    /// Do not read or write the history file
    #[arg(long)]
    no_history: bool,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "devtyping.log")]
    log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Target frames per second
    #[arg(long, default_value = "60")]
    fps: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .with(filter)
        .init();

    let mut config = TrainerConfig::default();
    config.engine.target_fps = args.fps;
    config.history_path = (!args.no_history).then_some(args.history);

    let history = config
        .history_path
        .as_ref()
        .map(HistoryStore::open)
        .transpose()?;
    let file_text = args.file.as_ref().map(fs::read_to_string).transpose()?;
    let text = initial_text(file_text, history.as_ref());

    let mut app = App::new(&text, &config, history);
    tracing::info!(
        chars = app.surface().char_count(),
        history = ?config.history_path,
        "devtyping starting"
    );

    let mut engine = Engine::with_config(config.engine.clone())?;
    let result = app.run(&mut engine);
    drop(engine);

    if let Some(stats) = app.last_stats() {
        println!(
            "last session: {:.0} wpm, {:.0}% accuracy, {:.1}s",
            stats.wpm, stats.accuracy, stats.time
        );
    }
    tracing::info!("devtyping exiting");

    result.map_err(Into::into)
}
