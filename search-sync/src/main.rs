use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use search_sync::{CoresSetup, Dependencies, IndexingError, SyncConfig};
use search_sync_repository::{Fixture, InMemoryPersistence, InMemorySearchIndex};
use search_sync_slots::Signal;

#[derive(Parser)]
#[command(name = "search-sync")]
#[command(about = "Keep the content search index in step with the repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the cores setup and print the configuration it selects
    Config,
    /// Purge the index and rebuild it from a repository fixture
    Reindex {
        /// JSON fixture with contents and locations
        #[arg(long)]
        fixture: PathBuf,

        /// Write to an in-memory index instead of OpenSearch
        #[arg(long)]
        dry_run: bool,
    },
    /// Dispatch recorded signals against a repository fixture
    Replay {
        /// JSON fixture with contents and locations
        #[arg(long)]
        fixture: PathBuf,

        /// JSON array of signals
        #[arg(long)]
        signals: PathBuf,

        /// Write to an in-memory index instead of OpenSearch
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!(error = %e, "search-sync failed");
        eprintln!("Error: {}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {}", err);
            source = err.source();
        }
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn run(cli: Cli) -> Result<(), IndexingError> {
    match cli.command {
        Commands::Config => print_config(),
        Commands::Reindex { fixture, dry_run } => {
            let (deps, index) = dependencies(&fixture, dry_run).await?;

            let summary = deps.reindexer.reindex_all().await?;

            println!(
                "Reindexed {} of {} contents in {} bulk call(s)",
                summary.indexed, summary.scanned, summary.batches
            );
            if let Some(index) = index {
                print_index(&index);
            }
            Ok(())
        }
        Commands::Replay {
            fixture,
            signals,
            dry_run,
        } => {
            let signals = load_signals(&signals)?;
            let (deps, index) = dependencies(&fixture, dry_run).await?;

            info!(count = signals.len(), "Replaying signals");
            let dispatched = deps.dispatcher.dispatch_all(&signals).await?;

            println!("Dispatched {} signal(s)", dispatched);
            if let Some(index) = index {
                print_index(&index);
            }
            Ok(())
        }
    }
}

fn print_config() -> Result<(), IndexingError> {
    let setup = CoresSetup::from_env()?;
    let config = SyncConfig::from_env()?;
    let indices = config.index_config();

    println!("cores setup:   {}", setup);
    println!("config file:   {}", setup.config_file());
    println!("opensearch:    {}", config.opensearch_url);
    println!("index layout:  {:?}", indices.layout);
    println!("indices:       {}", indices.fixed_indices().join(", "));
    match config.reindex_batch_size {
        Some(size) => println!("reindex batch: {}", size),
        None => println!("reindex batch: all at once"),
    }
    Ok(())
}

/// Wire dependencies over a fixture-backed repository.
///
/// Returns the in-memory index as well on dry runs so it can be reported.
async fn dependencies(
    fixture: &Path,
    dry_run: bool,
) -> Result<(Dependencies, Option<Arc<InMemorySearchIndex>>), IndexingError> {
    // Fail on a bad cores setup before touching the fixture or any backend.
    let config = SyncConfig::from_env()?;
    let persistence = Arc::new(load_fixture(fixture)?);

    info!(
        fixture = %fixture.display(),
        contents = persistence.content_count(),
        dry_run,
        "Loaded repository fixture"
    );

    if dry_run {
        let index = Arc::new(InMemorySearchIndex::new());
        let deps = Dependencies::in_memory(config, persistence, index.clone())?;
        Ok((deps, Some(index)))
    } else {
        let deps = Dependencies::new(config, persistence).await?;
        Ok((deps, None))
    }
}

fn load_fixture(path: &Path) -> Result<InMemoryPersistence, IndexingError> {
    let json = fs::read_to_string(path)?;
    let fixture = Fixture::from_json(&json)
        .map_err(|e| IndexingError::fixture(format!("{}: {}", path.display(), e)))?;
    Ok(InMemoryPersistence::from_fixture(fixture))
}

fn load_signals(path: &Path) -> Result<Vec<Signal>, IndexingError> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| IndexingError::fixture(format!("{}: {}", path.display(), e)))
}

fn print_index(index: &InMemorySearchIndex) {
    println!(
        "In-memory index: {} content document(s), {} location document(s)",
        index.content_count(),
        index.location_count()
    );
    for operation in index.operations() {
        println!("  {:?}", operation);
    }
}
