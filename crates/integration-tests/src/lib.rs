//! Integration tests for the Astro Store storefront state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p astro-store-integration-tests
//!
//! # With store logging
//! RUST_LOG=astro_store_storefront=debug cargo test -p astro-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart operations and totals through `AppState`
//! - `wishlist_scenarios` - Wishlist toggling and hand-off to the cart
//! - `persistence` - Reloading file-backed state, malformed stored data

use std::sync::Once;

use astro_store_core::{Price, ProductId};
use astro_store_storefront::config::StoreConfig;
use astro_store_storefront::{AppState, CartItemInput, WishlistItem};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// File-backed application state in a temporary directory.
///
/// Keeps the directory alive for the lifetime of the context; call
/// [`TestContext::reload`] to simulate a page reload.
pub struct TestContext {
    pub dir: TempDir,
    pub config: StoreConfig,
    pub state: AppState,
}

impl TestContext {
    /// Create a context with empty state.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = StoreConfig {
            state_dir: dir.path().to_path_buf(),
            ..StoreConfig::default()
        };
        let state = AppState::new(config.clone()).expect("open state");
        Self { dir, config, state }
    }

    /// Open a fresh `AppState` over the same directory.
    ///
    /// # Panics
    ///
    /// Panics if the state directory cannot be reopened.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn reload(&self) -> AppState {
        AppState::new(self.config.clone()).expect("reopen state")
    }

    /// Write raw text into the slot file for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[allow(clippy::expect_used)]
    pub fn write_raw(&self, key: &str, raw: &str) {
        std::fs::write(self.dir.path().join(format!("{key}.json")), raw).expect("write slot file");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a product id known to be valid.
///
/// # Panics
///
/// Panics if `id` is not a valid product id.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product_id(id: &str) -> ProductId {
    ProductId::parse(id).expect("valid product id")
}

/// Cart input for a game priced in cents.
#[must_use]
pub fn game(id: &str, cents: u32) -> CartItemInput {
    CartItemInput::new(
        product_id(id),
        format!("Game {id}"),
        format!("https://cdn.example.com/games/{id}.jpg"),
        Price::from_cents(cents),
    )
}

/// Wishlist entry for a game.
#[must_use]
pub fn saved(id: &str) -> WishlistItem {
    WishlistItem::new(
        product_id(id),
        format!("Game {id}"),
        format!("https://cdn.example.com/games/{id}.jpg"),
    )
}
