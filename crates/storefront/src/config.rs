//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_STATE_DIR` - Directory for the file-backed slots (default: `.astro-store`)
//! - `STOREFRONT_CART_KEY` - Slot key for the cart (default: `cart`)
//! - `STOREFRONT_WISHLIST_KEY` - Slot key for the wishlist (default: `wishlist`)

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::{self, keys};

const DEFAULT_STATE_DIR: &str = ".astro-store";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront state configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding `<key>.json` slot files
    pub state_dir: PathBuf,
    /// Slot key for the cart collection
    pub cart_key: String,
    /// Slot key for the wishlist collection
    pub wishlist_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            cart_key: keys::CART.to_string(),
            wishlist_key: keys::WISHLIST.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a slot key is not a valid storage key or the
    /// cart and wishlist keys collide.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let state_dir = lookup("STOREFRONT_STATE_DIR")
            .filter(|dir| !dir.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);
        let cart_key = get_key(&lookup, "STOREFRONT_CART_KEY", keys::CART)?;
        let wishlist_key = get_key(&lookup, "STOREFRONT_WISHLIST_KEY", keys::WISHLIST)?;

        if cart_key == wishlist_key {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_WISHLIST_KEY".to_string(),
                format!("must differ from the cart key ({cart_key})"),
            ));
        }

        Ok(Self {
            state_dir,
            cart_key,
            wishlist_key,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a slot key with a default, validated against storage key rules.
fn get_key<F>(lookup: &F, name: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = lookup(name).unwrap_or_else(|| default.to_string());
    storage::validate_key(&key)
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;
    Ok(key)
}
