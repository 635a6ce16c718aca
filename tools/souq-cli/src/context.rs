//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use souq_cache::{Cache, FileStore};
use souq_commerce::api::ProductFeed;
use souq_commerce::cart::CartStore;
use souq_commerce::catalog::Product;
use souq_commerce::Currency;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Currency the catalog and cart are priced in.
    pub fn currency(&self) -> Result<Currency> {
        self.config.catalog.currency()
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.resolve_path(&self.config.storage.dir);
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;

        Ok(CartStore::open_at(
            Cache::new(store),
            &self.config.storage.cart_key,
            self.currency()?,
        ))
    }

    /// Read the catalog file into products.
    pub fn load_catalog(&self) -> Result<Vec<Product>> {
        let path = self.resolve_path(&self.config.catalog.path);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let feed: ProductFeed = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        let products = feed.into_page(self.currency()?).data;
        self.output
            .debug(&format!("Loaded {} products from {}", products.len(), path.display()));
        Ok(products)
    }
}
