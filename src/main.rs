//! Provisioning entry point: prepares the storefront database.
//!
//! Initializes tracing, loads `.env` and `config.toml`, connects to the
//! database, creates any missing tables, and seeds the initial catalog.
//! The HTTP front end mounts on top of the library and is not part of this
//! binary.

use dotenvy::dotenv;
use fashionhub::config;
use fashionhub::errors::Result;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and make sure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db).await?;

    // 4. Seed the catalog if a config.toml is present
    match config::catalog::load_default_config() {
        Ok(catalog) => {
            config::catalog::seed_initial_catalog(&db, &catalog)
                .await
                .inspect(|_| info!("Catalog seeded successfully."))
                .inspect_err(|e| error!("Failed to seed catalog: {e}"))?;
        }
        Err(e) => warn!("Skipping catalog seed: {e}"),
    }

    info!("Storefront database is ready.");
    Ok(())
}
