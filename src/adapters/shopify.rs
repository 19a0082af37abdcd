use crate::config::shop_config::ShopConfig;
use crate::domain::model::{CallLimits, Product, VariantUpdate};
use crate::domain::ports::CatalogApi;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const CALL_LIMIT_HEADER: &str = "X-Shopify-Shop-Api-Call-Limit";
const LIMIT_THRESHOLD: f32 = 0.8;
const THROTTLE_PAUSE: Duration = Duration::from_millis(500);
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
// 平台標準 REST bucket 是 40 個呼叫
const DEFAULT_BUCKET: CallLimits = CallLimits { used: 40, total: 40 };

pub type LimitListener = Box<dyn Fn(CallLimits) + Send + Sync>;

/// 平台 REST API 客戶端，內建呼叫額度節流
pub struct ShopifyClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    password: String,
    limit_listener: Option<LimitListener>,
}

#[derive(Deserialize)]
struct ProductListEnvelope {
    products: Vec<Product>,
}

impl ShopifyClient {
    pub fn new(config: &ShopConfig, api_version: &str) -> Result<Self> {
        let base_url = match &config.api_base {
            Some(api_base) => format!(
                "{}/admin/api/{}",
                api_base.trim_end_matches('/'),
                api_version
            ),
            None => format!(
                "https://{}.myshopify.com/admin/api/{}",
                config.shop, api_version
            ),
        };

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            password: config.password.clone(),
            limit_listener: None,
        })
    }

    /// 註冊呼叫額度通知（接近或達到額度時觸發）
    pub fn on_call_limits(mut self, listener: impl Fn(CallLimits) + Send + Sync + 'static) -> Self {
        self.limit_listener = Some(Box::new(listener));
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(&self.api_key, Some(&self.password))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.client
            .put(format!("{}{}", self.base_url, path))
            .basic_auth(&self.api_key, Some(&self.password))
    }

    async fn send_throttled(&self, request: RequestBuilder) -> Result<Response> {
        let retry = request.try_clone();
        let response = request.send().await?;
        self.observe_limits(&response).await;

        // 429：等 Retry-After 後重試一次，重試仍失敗才回報
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            if let Some(retry_request) = retry {
                let wait = retry_after(&response).unwrap_or(DEFAULT_RETRY_AFTER);
                tracing::warn!(
                    "⏳ Call budget exhausted, retrying in {:.1}s",
                    wait.as_secs_f64()
                );
                tokio::time::sleep(wait).await;

                let response = retry_request.send().await?;
                self.observe_limits(&response).await;
                return Ok(response);
            }
        }

        Ok(response)
    }

    async fn observe_limits(&self, response: &Response) {
        let Some(limits) = call_limits(response) else {
            return;
        };

        tracing::debug!("📈 API call limit {}", limits);

        if limits.utilisation() >= LIMIT_THRESHOLD {
            if let Some(listener) = &self.limit_listener {
                listener(limits);
            }
            tracing::debug!(
                "🐢 Approaching call limit, pausing {}ms",
                THROTTLE_PAUSE.as_millis()
            );
            tokio::time::sleep(THROTTLE_PAUSE).await;
        }
    }

    fn check_status(&self, response: Response, variant_id: Option<u64>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(SyncError::AuthError {
                status: status.as_u16(),
            }),
            StatusCode::NOT_FOUND => match variant_id {
                Some(variant_id) => Err(SyncError::NotFound { variant_id }),
                None => Err(SyncError::UnexpectedStatus {
                    status: status.as_u16(),
                }),
            },
            StatusCode::TOO_MANY_REQUESTS => Err(SyncError::RateLimited {
                limits: call_limits(&response).unwrap_or(DEFAULT_BUCKET),
            }),
            _ => Err(SyncError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }
}

fn call_limits(response: &Response) -> Option<CallLimits> {
    response
        .headers()
        .get(CALL_LIMIT_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn retry_after(response: &Response) -> Option<Duration> {
    let secs: f64 = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    Some(Duration::from_secs_f64(secs.max(0.0)))
}

#[async_trait]
impl CatalogApi for ShopifyClient {
    async fn list_products(&self) -> Result<Vec<Product>> {
        tracing::debug!("📡 Fetching product list from {}", self.base_url);
        let response = self.send_throttled(self.get("/products.json")).await?;
        let response = self.check_status(response, None)?;

        let envelope: ProductListEnvelope = response.json().await?;
        tracing::debug!("📡 Fetched {} products", envelope.products.len());
        Ok(envelope.products)
    }

    async fn update_variant(&self, variant_id: u64, update: &VariantUpdate) -> Result<()> {
        let body = serde_json::json!({
            "variant": {
                "id": variant_id,
                "inventory_policy": update.inventory_policy,
            }
        });

        let request = self
            .put(&format!("/variants/{}.json", variant_id))
            .json(&body);
        let response = self.send_throttled(request).await?;
        self.check_status(response, Some(variant_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::InventoryPolicy;
    use httpmock::prelude::*;
    use std::sync::{Arc, Mutex};

    fn test_client(server: &MockServer) -> ShopifyClient {
        let config = ShopConfig {
            shop: "test-shop".to_string(),
            api_key: "key".to_string(),
            password: "secret".to_string(),
            api_base: Some(server.url("")),
        };
        ShopifyClient::new(&config, "2024-01").unwrap()
    }

    #[tokio::test]
    async fn test_list_products_parses_envelope() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/admin/api/2024-01/products.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "products": [
                        {"id": 1, "title": "Shirt", "variants": [
                            {"id": 11, "inventory_policy": "continue"},
                            {"id": 12, "inventory_policy": "deny"}
                        ]},
                        {"id": 2, "title": "Mug", "variants": []}
                    ]
                }));
        });

        let client = test_client(&server);
        let products = client.list_products().await.unwrap();

        api_mock.assert();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].variants.len(), 2);
        assert_eq!(
            products[0].variants[0].inventory_policy,
            InventoryPolicy::Continue
        );
    }

    #[tokio::test]
    async fn test_update_variant_sends_deny_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/admin/api/2024-01/variants/111.json")
                .json_body(serde_json::json!({
                    "variant": {"id": 111, "inventory_policy": "deny"}
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "variant": {"id": 111, "inventory_policy": "deny"}
                }));
        });

        let client = test_client(&server);
        client
            .update_variant(111, &VariantUpdate::deny())
            .await
            .unwrap();

        api_mock.assert();
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/api/2024-01/products.json");
            then.status(401);
        });

        let client = test_client(&server);
        let result = client.list_products().await;

        assert!(matches!(
            result,
            Err(SyncError::AuthError { status: 401 })
        ));
    }

    #[tokio::test]
    async fn test_missing_variant_maps_to_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/admin/api/2024-01/variants/999.json");
            then.status(404);
        });

        let client = test_client(&server);
        let result = client.update_variant(999, &VariantUpdate::deny()).await;

        assert!(matches!(
            result,
            Err(SyncError::NotFound { variant_id: 999 })
        ));
    }

    #[tokio::test]
    async fn test_persistent_429_retries_once_then_surfaces_rate_limit() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/admin/api/2024-01/products.json");
            then.status(429)
                .header("Retry-After", "0")
                .header(CALL_LIMIT_HEADER, "40/40");
        });

        let client = test_client(&server);
        let result = client.list_products().await;

        // one retry after the Retry-After pause, then the error surfaces
        api_mock.assert_hits(2);
        match result {
            Err(SyncError::RateLimited { limits }) => {
                assert_eq!(limits.used, 40);
                assert_eq!(limits.total, 40);
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_limit_header_triggers_listener() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/api/2024-01/products.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .header(CALL_LIMIT_HEADER, "39/40")
                .json_body(serde_json::json!({"products": []}));
        });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let client =
            test_client(&server).on_call_limits(move |limits| sink.lock().unwrap().push(limits));
        client.list_products().await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], CallLimits { used: 39, total: 40 });
    }

    #[tokio::test]
    async fn test_low_utilisation_does_not_notify() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/admin/api/2024-01/products.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .header(CALL_LIMIT_HEADER, "3/40")
                .json_body(serde_json::json!({"products": []}));
        });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let client =
            test_client(&server).on_call_limits(move |limits| sink.lock().unwrap().push(limits));
        client.list_products().await.unwrap();

        assert!(seen.lock().unwrap().is_empty());
    }
}
