use crate::utils::error::{Result, SyncError};

/// 依位置切成固定大小的批次，最後一批可能較小
pub fn batch<T>(jobs: Vec<T>, size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(SyncError::InvalidConfigValue {
            field: "batch_size".to_string(),
            value: size.to_string(),
            reason: "Batch size must be at least 1".to_string(),
        });
    }

    let mut batches = Vec::with_capacity(jobs.len().div_ceil(size));
    let mut current = Vec::with_capacity(size.min(jobs.len()));

    for job in jobs {
        if current.len() == size {
            batches.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
        current.push(job);
    }

    if !current.is_empty() {
        batches.push(current);
    }

    Ok(batches)
}
