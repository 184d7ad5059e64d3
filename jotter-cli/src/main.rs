//! jotter CLI - note board server and database tooling
//!
//! Subcommands:
//! - `serve`: start the HTTP server
//! - `init-db`: create the database schema and exit

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use jotter_server::server::{default_db_path, run_server, ServerArgs};
use jotter_server::Database;

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "jotter",
    author,
    version,
    about = "Self-hosted note board with categories"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve(ServerArgs),
    /// Create the database schema and exit
    InitDb(InitDbArgs),
}

#[derive(Args, Debug)]
struct InitDbArgs {
    /// Database file path (default: ~/.jotter/jotter.db)
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => run_server(args).await,
        Commands::InitDb(args) => init_db(args),
    }
}

fn init_db(args: InitDbArgs) -> Result<()> {
    let db_path = args.db_path.unwrap_or_else(default_db_path);

    let db = Database::open(&db_path)
        .with_context(|| format!("could not initialize database at {}", db_path.display()))?;

    info!("Database ready at {}", db.path().display());
    println!("Initialized database at {}", db.path().display());
    Ok(())
}
