pub mod shop_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "inventory-sync")]
#[command(about = "Bulk inventory policy migration for a remote product catalog")]
pub struct CliConfig {
    #[arg(long, default_value = "./config.toml", help = "Path to the credentials file")]
    pub config: String,

    #[arg(long, default_value = "./products.json")]
    pub snapshot_path: String,

    #[arg(long, default_value = "20")]
    pub batch_size: usize,

    #[arg(long, default_value = "2000")]
    pub cooldown_ms: u64,

    #[arg(long, default_value = "2024-01")]
    pub api_version: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn snapshot_path(&self) -> &str {
        &self.snapshot_path
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("config", &self.config)?;
        validate_path("snapshot_path", &self.snapshot_path)?;
        validate_positive_number("batch_size", self.batch_size, 1)?;
        validate_non_empty_string("api_version", &self.api_version)?;
        Ok(())
    }
}
