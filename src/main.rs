//! Binary entry point: open the tune database, reload it from the book tree
//! and print what happened.
use std::path::PathBuf;
use std::process::ExitCode;

use abc_tune_loader::config::{DEFAULT_EXTENSION, DEFAULT_ROOT};
use abc_tune_loader::db::default_db_path;
use abc_tune_loader::{open_store, LoaderConfig, TuneLibrary};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Load ABC tunes from numbered book directories into a SQLite database.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding the numbered book folders.
    #[arg(long, env = "ABC_TUNES_ROOT", default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// SQLite database file. Defaults to ~/.abc-tunes/tunes.sqlite.
    #[arg(long, env = "ABC_TUNES_DB")]
    db: Option<PathBuf>,

    /// Source file extension.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let db_path = match args.db {
        Some(path) => path,
        None => default_db_path().ok_or_else(|| anyhow!("could not locate home directory"))?,
    };
    tracing::info!(db = %db_path.display(), root = %args.root.display(), "starting tune load");

    let store = open_store(&db_path).context("failed to open tune database")?;
    let mut library = TuneLibrary::new(store);

    let config = LoaderConfig::new(args.root).with_extension(&args.extension);
    let report = library.reload(&config).context("tune load aborted")?;

    println!("{report}");
    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

/// `RUST_LOG` wins over the `-v` flags when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
