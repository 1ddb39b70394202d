use crate::core::{Catalog, ConfigProvider, Product, ProductId, StockInfo};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Catalog backed by the storefront REST API (`products/{id}` and `stock/{id}`).
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| CartError::InvalidConfigValueError {
            field: "api_endpoint".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> Result<T> {
        let url = self
            .base_url
            .join(&format!("{}/{}", resource, id))
            .map_err(|e| CartError::ConfigError {
                message: format!("cannot build {} url: {}", resource, e),
            })?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(CartError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(CartError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product> {
        self.get_json("products", id).await
    }

    async fn stock(&self, id: ProductId) -> Result<StockInfo> {
        self.get_json("stock", id).await
    }
}
