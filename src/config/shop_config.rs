use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 平台憑證，從 TOML 檔載入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    pub shop: String,
    pub api_key: String,
    pub password: String,
    /// 覆寫 API base URL（私有部署或測試用）
    #[serde(default)]
    pub api_base: Option<String>,
}

impl ShopConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            return Err(SyncError::ConfigError {
                message: format!("Credentials file not found: {}", path.display()),
            });
        }

        let content = fs::read_to_string(path)?;
        let config: ShopConfig = toml::from_str(&content).map_err(|e| SyncError::ConfigError {
            message: format!("Invalid credentials file: {}", e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("shop", &self.shop)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_non_empty_string("password", &self.password)?;

        if let Some(api_base) = &self.api_base {
            validate_url("api_base", api_base)?;
        }

        Ok(())
    }
}
