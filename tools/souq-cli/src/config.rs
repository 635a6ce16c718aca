//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use souq_commerce::cart::DEFAULT_CART_KEY;
use souq_commerce::search::DEFAULT_PAGE_SIZE;
use souq_commerce::Currency;

/// Names searched for, in order, when no `--config` is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["souq.toml", ".souq.toml", "souq.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Which catalog to browse.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config text, choosing the format from the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Cart storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the file store writes into, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Key the cart is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_storage_dir() -> String {
    ".souq".to_string()
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
        }
    }
}

/// Catalog source and listing defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products JSON, either a paginated response or a bare array.
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// Products per page when `--per-page` is not given.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Currency code prices are read in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            page_size: default_page_size(),
            currency: default_currency(),
        }
    }
}

impl CatalogConfig {
    /// The configured currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unknown currency in config: {}", self.currency))
    }
}

/// Generate a default souq.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Souq storefront configuration

[storage]
dir = "{dir}"
cart_key = "{cart_key}"

[catalog]
path = "{path}"
page_size = {page_size}
currency = "{currency}"
"#,
        dir = default_storage_dir(),
        cart_key = default_cart_key(),
        path = default_catalog_path(),
        page_size = default_page_size(),
        currency = default_currency(),
    )
}
