use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: ProductId },

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockExhausted {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    #[error("Product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    #[error("Product {product_id} appears more than once in the stored cart")]
    DuplicateItem { product_id: ProductId },

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Stock,
    Input,
    Cart,
    Transport,
    Storage,
    Config,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::NotFound { .. } => ErrorCategory::Lookup,
            CartError::StockExhausted { .. } => ErrorCategory::Stock,
            CartError::InvalidAmount { .. } => ErrorCategory::Input,
            CartError::NotInCart { .. } => ErrorCategory::Cart,
            CartError::Http { .. } | CartError::ApiError(_) => ErrorCategory::Transport,
            CartError::DuplicateItem { .. }
            | CartError::IoError(_)
            | CartError::SerializationError(_) => ErrorCategory::Storage,
            CartError::ConfigError { .. } | CartError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::NotFound { resource, id } => {
                format!("Could not find {} {}", resource, id)
            }
            CartError::StockExhausted { available, .. } => {
                format!("Only {} left in stock", available)
            }
            CartError::InvalidAmount { amount, .. } => {
                format!("{} is not a valid quantity", amount)
            }
            CartError::NotInCart { product_id } => {
                format!("Product {} is not in your cart", product_id)
            }
            CartError::Http { .. } | CartError::ApiError(_) => {
                "The store service could not be reached".to_string()
            }
            CartError::DuplicateItem { .. }
            | CartError::IoError(_)
            | CartError::SerializationError(_) => "The saved cart could not be read".to_string(),
            CartError::ConfigError { message } => format!("Invalid configuration: {}", message),
            CartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Lookup => "Check the product id",
            ErrorCategory::Stock => "Choose a smaller quantity",
            ErrorCategory::Input => "Quantities must be positive whole numbers",
            ErrorCategory::Cart => "Run `show` to list the products in your cart",
            ErrorCategory::Transport => "Check --api-endpoint and that the API is running",
            ErrorCategory::Storage => "Remove the stored cart file to start over",
            ErrorCategory::Config => "Fix the configuration value and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
