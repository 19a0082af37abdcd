use clap::Parser;
use inventory_sync::utils::{logger, validation::Validate};
use inventory_sync::{
    CliConfig, JsonSnapshotStore, RunOutcome, ShopConfig, ShopifyClient, SyncRunner,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting inventory-sync CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let shop_config = match ShopConfig::from_file(&config.config) {
        Ok(shop_config) => shop_config,
        Err(e) => {
            tracing::error!("❌ Could not load credentials: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let client = match ShopifyClient::new(&shop_config, &config.api_version) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Could not build API client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let client = client.on_call_limits(|limits| tracing::warn!("⚠️ LIMIT HIT! {}", limits));

    let store = JsonSnapshotStore::new(&config.snapshot_path);
    let runner = SyncRunner::new(Arc::new(client), store, config);

    match runner.run().await {
        Ok(RunOutcome::SnapshotFetched { products }) => {
            println!(
                "✅ Snapshot saved ({} products); run again to apply updates",
                products
            );
        }
        Ok(RunOutcome::Migrated(report)) => {
            // 失敗的 variant 逐一列出，但整體仍算完成
            for (variant_id, error) in report.failures() {
                tracing::error!("❌ Variant {} failed: {}", variant_id, error);
            }

            if report.is_clean() {
                println!(
                    "✅ Updated {} variants across {} batches",
                    report.total(),
                    report.batches()
                );
            } else {
                println!(
                    "⚠️ Completed with {} failures out of {} updates",
                    report.failed(),
                    report.total()
                );
            }
        }
        Err(e) => {
            tracing::error!("❌ Migration run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
