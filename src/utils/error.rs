use crate::domain::model::CallLimits;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Authentication rejected by the platform (status {status})")]
    AuthError { status: u16 },

    #[error("Variant {variant_id} no longer exists remotely")]
    NotFound { variant_id: u64 },

    #[error("Rate limited by the platform (call limit {limits})")]
    RateLimited { limits: CallLimits },

    #[error("API request failed with status: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Snapshot decode error: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
