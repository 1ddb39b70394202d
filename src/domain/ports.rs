use crate::domain::model::{Notice, Product, ProductId, StockInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only product and stock lookups.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<Product>;
    async fn stock(&self, id: ProductId) -> Result<StockInfo>;
}

/// String key-value store the cart is persisted to.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Fire-and-forget sink for user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn cart_key(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
}
