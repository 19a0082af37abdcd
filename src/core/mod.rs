pub mod batch;
pub mod filter;
pub mod job;
pub mod scheduler;

pub use crate::domain::model::{JobOutcome, RunReport};
pub use crate::domain::ports::{CatalogApi, ConfigProvider, SnapshotStore};
pub use crate::utils::error::Result;
