use crate::core::job::UpdateJob;
use crate::domain::model::{JobOutcome, RunReport};
use crate::domain::ports::CatalogApi;
use crate::utils::error::SyncError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// 批次排程器：逐批併發執行，批次之間固定冷卻
pub struct Scheduler<A: CatalogApi> {
    api: Arc<A>,
    cooldown: Duration,
}

impl<A: CatalogApi> Scheduler<A> {
    pub fn new(api: Arc<A>, cooldown: Duration) -> Self {
        Self { api, cooldown }
    }

    /// 依序執行每個批次；批內工作全部結束（成功或失敗）才進入下一批
    pub async fn run(&self, batches: Vec<Vec<UpdateJob>>) -> RunReport {
        let mut report = RunReport::default();
        let total_batches = batches.len();

        for (index, jobs) in batches.into_iter().enumerate() {
            tracing::info!(
                "🚚 Batch {}/{} starting ({} updates)",
                index + 1,
                total_batches,
                jobs.len()
            );

            // 全部結束才算完成，單一失敗不會中斷其他工作
            let api = &self.api;
            let outcomes = join_all(jobs.into_iter().map(|job| async move {
                let variant_id = job.variant_id;
                let result = job.invoke(api.as_ref()).await;

                if let Err(SyncError::RateLimited { limits }) = &result {
                    tracing::warn!(
                        "⚠️ Call limit hit while updating variant {} ({})",
                        variant_id,
                        limits
                    );
                }

                JobOutcome { variant_id, result }
            }))
            .await;

            let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
            if failed > 0 {
                tracing::warn!(
                    "🔶 Batch {}/{} done with {} failures",
                    index + 1,
                    total_batches,
                    failed
                );
            } else {
                tracing::info!("✅ Batch {}/{} done", index + 1, total_batches);
            }

            report.record_batch(outcomes);

            // 最後一批之後不需要冷卻
            if index + 1 < total_batches {
                tracing::debug!(
                    "⏸️ Cooling down {}ms before next batch",
                    self.cooldown.as_millis()
                );
                tokio::time::sleep(self.cooldown).await;
            }
        }

        report
    }
}
