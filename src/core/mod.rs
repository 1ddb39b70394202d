pub mod cart_store;

pub use crate::domain::model::{Cart, LineItem, Notice, Product, ProductId, StockInfo};
pub use crate::domain::ports::{Catalog, ConfigProvider, Notifier, Storage};
pub use crate::utils::error::Result;
pub use cart_store::{AmountUpdate, CartStore, DEFAULT_CART_KEY};
