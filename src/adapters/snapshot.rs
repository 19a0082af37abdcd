use crate::domain::model::Product;
use crate::domain::ports::SnapshotStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

/// 把商品清單存成本地 JSON 檔
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for JsonSnapshotStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn load(&self) -> Result<Vec<Product>> {
        let data = fs::read(&self.path)?;
        let products = serde_json::from_slice(&data)?;
        Ok(products)
    }

    async fn save(&self, products: &[Product]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_vec_pretty(products)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
