use crate::domain::model::{Product, VariantUpdate};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn update_variant(&self, variant_id: u64, update: &VariantUpdate) -> Result<()>;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    fn exists(&self) -> bool;
    async fn load(&self) -> Result<Vec<Product>>;
    async fn save(&self, products: &[Product]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn snapshot_path(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn cooldown_ms(&self) -> u64;
    fn api_version(&self) -> &str;
}
