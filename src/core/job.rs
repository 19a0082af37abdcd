use crate::domain::model::VariantUpdate;
use crate::domain::ports::CatalogApi;
use crate::utils::error::Result;

/// 單一 variant 的延遲更新工作，呼叫 invoke 前不產生任何副作用
#[derive(Debug, Clone)]
pub struct UpdateJob {
    pub variant_id: u64,
    update: VariantUpdate,
}

impl UpdateJob {
    pub fn new(variant_id: u64, update: VariantUpdate) -> Self {
        Self { variant_id, update }
    }

    /// 標準的遷移工作：把 inventory_policy 改成 deny
    pub fn deny(variant_id: u64) -> Self {
        Self::new(variant_id, VariantUpdate::deny())
    }

    // Consumes self so a job cannot be invoked twice.
    pub async fn invoke<A: CatalogApi + ?Sized>(self, api: &A) -> Result<()> {
        api.update_variant(self.variant_id, &self.update).await
    }
}
