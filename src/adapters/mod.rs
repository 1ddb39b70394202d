// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod notifier;
pub mod storage;

pub use http::HttpCatalog;
pub use notifier::ConsoleNotifier;
pub use storage::{LocalStorage, MemoryStorage};
