use crate::config::{DEFAULT_STORAGE_PATH, DEFAULT_TIMEOUT_SECS};
use crate::core::{ConfigProvider, DEFAULT_CART_KEY};
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
    pub cart_key: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable `VAR`.
    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn storage_path(&self) -> &str {
        self.storage.path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH)
    }

    fn cart_key(&self) -> &str {
        self.storage.cart_key.as_deref().unwrap_or(DEFAULT_CART_KEY)
    }

    fn request_timeout_secs(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.example.com"
timeout_seconds = 4

[storage]
path = "/var/lib/rocket-cart"
cart_key = "@RocketShoes:cart:v2"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_base_url(), "https://api.example.com");
        assert_eq!(config.request_timeout_secs(), 4);
        assert_eq!(config.storage_path(), "/var/lib/rocket-cart");
        assert_eq!(config.cart_key(), "@RocketShoes:cart:v2");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_storage_section_is_optional() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:3333"
"#,
        )
        .unwrap();

        assert_eq!(config.storage_path(), "./.rocket-cart");
        assert_eq!(config.cart_key(), "@RocketShoes:cart");
        assert_eq!(config.request_timeout_secs(), 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROCKET_CART_TEST_API", "https://test.api.com");

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${ROCKET_CART_TEST_API}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://test.api.com");

        std::env::remove_var("ROCKET_CART_TEST_API");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:3333"

[storage]
cart_key = "   "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_section_is_an_error() {
        let err = TomlConfig::from_toml_str("[storage]\npath = \"x\"\n").unwrap_err();
        assert!(matches!(err, CartError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"https://api.example.com\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api_base_url(), "https://api.example.com");
    }
}
