use crate::utils::error::SyncError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: u64,
    pub inventory_policy: InventoryPolicy,
}

/// 庫存策略：賣完後繼續賣 (continue) 或停止賣 (deny)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryPolicy {
    Continue,
    Deny,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantUpdate {
    pub inventory_policy: InventoryPolicy,
}

impl VariantUpdate {
    pub fn deny() -> Self {
        Self {
            inventory_policy: InventoryPolicy::Deny,
        }
    }
}

/// 平台回報的 API 呼叫額度，格式 "used/total"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallLimits {
    pub used: u32,
    pub total: u32,
}

impl CallLimits {
    pub fn utilisation(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.used as f32 / self.total as f32
    }
}

impl fmt::Display for CallLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.used, self.total)
    }
}

impl FromStr for CallLimits {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (used, total) = s.trim().split_once('/').ok_or(())?;
        Ok(Self {
            used: used.trim().parse().map_err(|_| ())?,
            total: total.trim().parse().map_err(|_| ())?,
        })
    }
}

#[derive(Debug)]
pub struct JobOutcome {
    pub variant_id: u64,
    pub result: Result<(), SyncError>,
}

/// 一次遷移執行的彙總結果
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<JobOutcome>,
    batches: usize,
}

impl RunReport {
    pub fn record_batch(&mut self, outcomes: Vec<JobOutcome>) {
        self.batches += 1;
        self.outcomes.extend(outcomes);
    }

    pub fn outcomes(&self) -> &[JobOutcome] {
        &self.outcomes
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (u64, &SyncError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.variant_id, e)))
    }
}
