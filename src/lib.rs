pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CartCommand, CliConfig};

pub use adapters::{ConsoleNotifier, HttpCatalog, LocalStorage, MemoryStorage};
pub use config::TomlConfig;
pub use core::{AmountUpdate, Cart, CartStore, LineItem, Notice, DEFAULT_CART_KEY};
pub use utils::error::{CartError, Result};
