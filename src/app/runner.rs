use crate::core::batch::batch;
use crate::core::filter::qualifying_variant_ids;
use crate::core::job::UpdateJob;
use crate::core::scheduler::Scheduler;
use crate::domain::model::RunReport;
use crate::domain::ports::{CatalogApi, ConfigProvider, SnapshotStore};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// 一次執行的結果：抓快照就結束，或完成遷移
#[derive(Debug)]
pub enum RunOutcome {
    SnapshotFetched { products: usize },
    Migrated(RunReport),
}

/// 決定重播快照或抓取商品清單，並驅動整個遷移流程
pub struct SyncRunner<A: CatalogApi, S: SnapshotStore, C: ConfigProvider> {
    api: Arc<A>,
    store: S,
    config: C,
}

impl<A: CatalogApi, S: SnapshotStore, C: ConfigProvider> SyncRunner<A, S, C> {
    pub fn new(api: Arc<A>, store: S, config: C) -> Self {
        Self { api, store, config }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        if self.store.exists() {
            self.replay_snapshot().await
        } else {
            self.fetch_snapshot().await
        }
    }

    /// 快照存在：過濾、分批、排程更新
    async fn replay_snapshot(&self) -> Result<RunOutcome> {
        tracing::info!("📂 Reading products from snapshot instead of fetching them");
        let products = self.store.load().await?;

        let variant_ids = qualifying_variant_ids(&products);
        tracing::info!(
            "🔍 {} variants across {} products still allow overselling",
            variant_ids.len(),
            products.len()
        );

        let jobs: Vec<UpdateJob> = variant_ids.into_iter().map(UpdateJob::deny).collect();
        let batches = batch(jobs, self.config.batch_size())?;

        let cooldown = Duration::from_millis(self.config.cooldown_ms());
        let scheduler = Scheduler::new(Arc::clone(&self.api), cooldown);
        let report = scheduler.run(batches).await;

        tracing::info!(
            "🏁 Migration completed: {} succeeded, {} failed out of {}",
            report.succeeded(),
            report.failed(),
            report.total()
        );

        Ok(RunOutcome::Migrated(report))
    }

    /// 快照不存在：抓一次商品清單存檔，不做任何更新
    async fn fetch_snapshot(&self) -> Result<RunOutcome> {
        tracing::info!("🌐 No snapshot found, fetching product list from the platform");
        let products = self.api.list_products().await?;
        self.store.save(&products).await?;

        tracing::info!(
            "💾 Snapshot saved ({} products); run again to apply updates",
            products.len()
        );

        Ok(RunOutcome::SnapshotFetched {
            products: products.len(),
        })
    }
}
