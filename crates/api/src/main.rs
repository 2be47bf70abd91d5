//! House Price Predictor - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== House Price Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Artifacts: scaler={}, model={}",
        config.artifacts.scaler_path.display(),
        config.artifacts.model_path.display()
    );

    run_server(config).await?;

    Ok(())
}
