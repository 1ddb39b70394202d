use crate::core::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// File-backed key-value store: one `<key>.json` file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Path::new(&self.base_path).join(format!("{}.json", file_name))
    }
}

impl Storage for LocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.path_for(key);
        match fs::read_to_string(&full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, value)?;
        Ok(())
    }
}

/// In-process store, handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().await;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().await;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_is_sanitized_into_file_name() {
        let storage = LocalStorage::new("/tmp/carts".to_string());
        assert_eq!(
            storage.path_for("@RocketShoes:cart"),
            Path::new("/tmp/carts/_RocketShoes_cart.json")
        );
    }

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").to_str().unwrap().to_string();
        let storage = LocalStorage::new(base);

        assert_eq!(storage.get_item("@RocketShoes:cart").await.unwrap(), None);

        storage.set_item("@RocketShoes:cart", "[]").await.unwrap();
        storage
            .set_item("@RocketShoes:cart", r#"[{"id":1}]"#)
            .await
            .unwrap();

        assert_eq!(
            storage.get_item("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_memory_storage_is_shared_between_clones() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("k", "v").await.unwrap();

        assert_eq!(other.get_item("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(other.get_item("missing").await.unwrap(), None);
    }
}
