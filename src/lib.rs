pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::shopify::ShopifyClient;
pub use adapters::snapshot::JsonSnapshotStore;
pub use app::runner::{RunOutcome, SyncRunner};
pub use config::shop_config::ShopConfig;
pub use config::CliConfig;
pub use utils::error::{Result, SyncError};
