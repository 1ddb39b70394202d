use crate::config::{
    TomlConfig, DEFAULT_API_ENDPOINT, DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECS,
};
use crate::core::{ConfigProvider, ProductId, DEFAULT_CART_KEY};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "rocket-cart")]
#[command(about = "Manage the RocketShoes shopping cart")]
pub struct CliConfig {
    /// Path to a TOML configuration file; flags given here override it
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the products/stock API [default: http://localhost:3333]
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Directory the cart is stored in [default: ./.rocket-cart]
    #[arg(long, global = true)]
    pub storage_path: Option<String>,

    /// Storage key holding the cart [default: @RocketShoes:cart]
    #[arg(long, global = true)]
    pub cart_key: Option<String>,

    /// Request timeout in seconds [default: 10]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the amount of a product already in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

impl CliConfig {
    /// Copies every flag that was given on the command line into `config`.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(endpoint) = &self.api_endpoint {
            config.api.base_url = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_seconds = Some(timeout);
        }
        if let Some(path) = &self.storage_path {
            config.storage.path = Some(path.clone());
        }
        if let Some(key) = &self.cart_key {
            config.storage.cart_key = Some(key.clone());
        }
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        self.api_endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn storage_path(&self) -> &str {
        self.storage_path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH)
    }

    fn cart_key(&self) -> &str {
        self.cart_key.as_deref().unwrap_or(DEFAULT_CART_KEY)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider(self)
    }
}
