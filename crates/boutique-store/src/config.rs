//! # Store Configuration
//!
//! Configuration for storage, catalog paging and shipping.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOUTIQUE_DATA_DIR=/tmp/boutique                                    │
//! │     BOUTIQUE_PAGE_SIZE=24                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/boutique/boutique.toml (Linux)                           │
//! │     ~/Library/Application Support/com.boutique.store/boutique.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     fashion-cart / fashion-wishlist, 12 per page, free over $100       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # boutique.toml
//! [storage]
//! data_dir = "/var/lib/boutique"
//! cart_key = "fashion-cart"
//! wishlist_key = "fashion-wishlist"
//! write_behind = false
//!
//! [catalog]
//! page_size = 12
//!
//! [shipping]
//! free_threshold_cents = 10000
//! flat_rate_cents = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use boutique_core::{Money, ShippingPolicy, DEFAULT_PAGE_SIZE, FLAT_SHIPPING_RATE, FREE_SHIPPING_THRESHOLD};

use crate::error::{StoreError, StoreResult};
use crate::persistence::{StorageKeys, DEFAULT_CART_KEY, DEFAULT_WISHLIST_KEY};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "boutique.toml";

// =============================================================================
// Storage Settings
// =============================================================================

/// Where and how the cart/wishlist are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory for `FileStorage`. Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    #[serde(default = "default_wishlist_key")]
    pub wishlist_key: String,

    /// Queue writes on a background worker instead of writing inline.
    /// Requires a tokio runtime when the session is opened.
    #[serde(default)]
    pub write_behind: bool,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_wishlist_key() -> String {
    DEFAULT_WISHLIST_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            cart_key: default_cart_key(),
            wishlist_key: default_wishlist_key(),
            write_behind: false,
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Products per catalog page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Shipping Settings
// =============================================================================

/// Shipping rule in cents, so the TOML stays free of float rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingSettings {
    #[serde(default = "default_free_threshold")]
    pub free_threshold_cents: i64,

    #[serde(default = "default_flat_rate")]
    pub flat_rate_cents: i64,
}

fn default_free_threshold() -> i64 {
    FREE_SHIPPING_THRESHOLD.cents()
}

fn default_flat_rate() -> i64 {
    FLAT_SHIPPING_RATE.cents()
}

impl Default for ShippingSettings {
    fn default() -> Self {
        ShippingSettings {
            free_threshold_cents: default_free_threshold(),
            flat_rate_cents: default_flat_rate(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub shipping: ShippingSettings,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (boutique.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without env overrides or validation.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let storage = &self.storage;

        if storage.cart_key.trim().is_empty() || storage.wishlist_key.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "storage keys must not be empty".into(),
            ));
        }

        if storage.cart_key == storage.wishlist_key {
            return Err(StoreError::InvalidConfig(format!(
                "cart_key and wishlist_key must differ, both are '{}'",
                storage.cart_key
            )));
        }

        if self.catalog.page_size == 0 {
            return Err(StoreError::InvalidConfig(
                "page_size must be greater than 0".into(),
            ));
        }

        if self.shipping.free_threshold_cents < 0 || self.shipping.flat_rate_cents < 0 {
            return Err(StoreError::InvalidConfig(
                "shipping amounts must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable source (the process environment
    /// in production, a map in tests).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("BOUTIQUE_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = var("BOUTIQUE_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(key) = var("BOUTIQUE_WISHLIST_KEY") {
            self.storage.wishlist_key = key;
        }

        if let Some(size) = var("BOUTIQUE_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(n) => self.catalog.page_size = n,
                Err(_) => warn!(value = %size, "Ignoring invalid BOUTIQUE_PAGE_SIZE"),
            }
        }

        if let Some(cents) = var("BOUTIQUE_FREE_SHIPPING_CENTS") {
            match cents.parse::<i64>() {
                Ok(n) => self.shipping.free_threshold_cents = n,
                Err(_) => warn!(value = %cents, "Ignoring invalid BOUTIQUE_FREE_SHIPPING_CENTS"),
            }
        }

        if let Some(cents) = var("BOUTIQUE_FLAT_SHIPPING_CENTS") {
            match cents.parse::<i64>() {
                Ok(n) => self.shipping.flat_rate_cents = n,
                Err(_) => warn!(value = %cents, "Ignoring invalid BOUTIQUE_FLAT_SHIPPING_CENTS"),
            }
        }

        if let Some(flag) = var("BOUTIQUE_WRITE_BEHIND") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.storage.write_behind = true,
                "0" | "false" | "no" | "off" => self.storage.write_behind = false,
                _ => warn!(value = %flag, "Unknown BOUTIQUE_WRITE_BEHIND value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "boutique", "store")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The configured data directory, else the platform data directory.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.clone().or_else(|| {
            directories::ProjectDirs::from("com", "boutique", "store")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::new(&self.storage.cart_key, &self.storage.wishlist_key)
    }

    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(
            Money::from_cents(self.shipping.free_threshold_cents),
            Money::from_cents(self.shipping.flat_rate_cents),
        )
    }

    pub fn page_size(&self) -> usize {
        self.catalog.page_size
    }
}
