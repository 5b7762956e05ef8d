//! blockfs Shell Binary
//!
//! Runs shell commands against a fresh in-memory volume.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use blockfs::shell::Session;
use blockfs::{Config, Volume};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// blockfs Shell
#[derive(Parser, Debug)]
#[command(name = "blockfs-shell")]
#[command(about = "In-memory block filesystem shell")]
#[command(version)]
struct Args {
    /// Disk capacity in bytes
    #[arg(short, long, default_value = "819200")]
    capacity: usize,

    /// Block size in bytes
    #[arg(short, long, default_value = "5")]
    block_size: usize,

    /// Directory that receives snapshot exports
    #[arg(short, long, default_value = "./blockfs_snapshots")]
    snapshot_dir: String,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Export a snapshot when the session ends
    #[arg(long)]
    snapshot_on_exit: bool,
}

fn main() {
    // Initialize tracing/logging (stderr, so command output stays clean)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blockfs=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("blockfs shell v{}", blockfs::VERSION);
    tracing::info!("Disk: {} bytes, {} byte blocks", args.capacity, args.block_size);

    // Build config from args
    let config = Config::builder()
        .capacity(args.capacity)
        .block_size(args.block_size)
        .snapshot_dir(&args.snapshot_dir)
        .build();

    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let volume = match Volume::open(config) {
        Ok(v) => Arc::new(v),
        Err(e) => {
            tracing::error!("Failed to open volume: {}", e);
            std::process::exit(1);
        }
    };

    let result = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => run_session(BufReader::new(file), Arc::clone(&volume)),
            Err(e) => {
                tracing::error!("Cannot open script {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => run_session(io::stdin().lock(), Arc::clone(&volume)),
    };

    match result {
        Ok(count) => tracing::info!("Session finished after {} commands", count),
        Err(e) => {
            tracing::error!("Session error: {}", e);
            std::process::exit(1);
        }
    }

    // A failed export is fatal
    if args.snapshot_on_exit {
        match volume.snapshot() {
            Ok(path) => tracing::info!("Snapshot saved to {}", path.display()),
            Err(e) => {
                tracing::error!("Snapshot export failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_session<R: BufRead>(reader: R, volume: Arc<Volume>) -> blockfs::Result<usize> {
    let stdout = io::stdout();
    let mut session = Session::new(reader, stdout.lock(), volume);
    session.run()
}
