//! `vmmsd`, the vending machine management server binary.
//!
//! Usage:
//!   vmmsd [--data-dir <dir>] [--sqlite <path>] [--listen <addr>]
//!
//! The SQLite database defaults to `{data-dir}/vmms.sqlite`.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use vending::VendingModule;
use vmms_core::{Module, ServiceConfig};

/// Vending machine management server.
#[derive(Parser, Debug)]
#[command(name = "vmmsd", about = "Vending machine management server")]
struct Cli {
    /// Directory holding the SQLite database (created if missing).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Path to the SQLite database file (overrides the data-dir default).
    #[arg(long = "sqlite")]
    sqlite: Option<PathBuf>,

    /// Listen address for the HTTP server.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = ServiceConfig {
        data_dir: cli.data_dir,
        sqlite_path: cli.sqlite,
        listen: cli.listen,
    };

    if let Some(dir) = &config.data_dir {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize the embedded store.
    let sqlite_path = config.resolve_sqlite_path();
    info!("Opening SQLite database at {}", sqlite_path.display());
    let sql: Arc<dyn vmms_sql::SQLStore> = Arc::new(
        vmms_sql::SqliteStore::open(&sqlite_path)
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    let vending_module = VendingModule::new(Arc::clone(&sql))
        .map_err(|e| anyhow::anyhow!("failed to initialize vending module: {}", e))?;

    // Seed the product catalogue. Duplicate rows are skipped by the seed
    // itself; anything else is logged and startup continues.
    if let Err(e) = vending_module.seed_products() {
        warn!("product seeding failed: {}", e);
    }
    info!("Vending module initialized");

    let module_routes = vec![(vending_module.name(), vending_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("VMMS server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
