//! Canonical HTTP implementation of the order gateway.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::api::{ApiError, CatalogPage, Order, OrderGateway, OrderReceipt};
use crate::config::ApiConfig;
use crate::model::Product;

/// Non-2xx bodies carry the failure text under this shape.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the shop backend over HTTP.
///
/// Catalog images arrive as paths relative to the asset host; the client
/// prefixes the configured asset base so the rest of the application only
/// ever sees absolute URLs.
pub struct ShopClient {
    http: Client,
    base_url: String,
    assets_url: String,
}

impl ShopClient {
    pub fn new(config: &ApiConfig) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            assets_url: config.assets_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Surfaces the server's `{"error": ...}` text, falling back to the
    /// HTTP status line.
    async fn status_error(url: String, response: Response) -> ApiError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        ApiError::Status {
            url,
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl OrderGateway for ShopClient {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("/product");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(Self::status_error(url, response).await);
        }
        let page: CatalogPage =
            response
                .json()
                .await
                .map_err(|source| ApiError::Decode {
                    url: url.clone(),
                    source,
                })?;
        if page.total != page.items.len() as u64 {
            tracing::debug!(
                "catalog envelope reports {} items, body carries {}",
                page.total,
                page.items.len()
            );
        }
        Ok(page
            .items
            .into_iter()
            .map(|mut product| {
                product.image = format!("{}{}", self.assets_url, product.image);
                product
            })
            .collect())
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderReceipt, ApiError> {
        let url = self.endpoint("/order");
        let response = self
            .http
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(Self::status_error(url, response).await);
        }
        response.json().await.map_err(|source| ApiError::Decode {
            url,
            source,
        })
    }
}
