mod config;
mod inventory;
mod seed;
mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use inventory::InventoryClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fabric_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    if cfg.inventory_token.is_empty() {
        tracing::warn!("INVENTORY_TOKEN not set - requests will be sent unauthenticated");
    }
    tracing::info!("Starting FabricSeed");
    tracing::info!("Inventory: {}", cfg.inventory_url);
    tracing::info!("Branch: {}", cfg.branch);

    let client = InventoryClient::new(
        cfg.inventory_url,
        cfg.inventory_token,
        cfg.branch,
        cfg.request_timeout_secs,
    )?;

    if !client.test_connection().await {
        tracing::warn!("Inventory API not reachable; proceeding, the first stage will report the error");
    }

    let report = seed::run(&client).await?;

    for stage in &report.stages {
        if stage.errors.is_empty() {
            tracing::info!(
                "{}: {} created, {} skipped",
                stage.stage,
                stage.created,
                stage.skipped
            );
        } else {
            tracing::warn!(
                "{}: {} created, {} skipped, {} errors",
                stage.stage,
                stage.created,
                stage.skipped,
                stage.errors.len()
            );
        }
    }
    tracing::debug!(
        "Full report: {}",
        serde_json::to_string(&report).unwrap_or_default()
    );
    tracing::info!(
        "Seeding finished in {}s",
        (report.finished_at - report.started_at).num_seconds()
    );

    Ok(())
}
