//! Laptop Catalog - Main Entry Point
//!
//! Usage: `laptop-catalog [config.toml]`

use catalog_api::{config, init_logging, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "catalog.toml".to_string());

    let config = config::load(&config_path)?;
    init_logging(&config.logging)?;

    info!("=== Laptop Catalog v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Loaded configuration from {} (if present)", config_path);

    run_server(config).await
}
