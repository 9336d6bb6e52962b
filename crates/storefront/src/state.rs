//! Application state shared across views.

use std::fmt;
use std::rc::Rc;

use astro_store_core::Price;

use crate::cart::{CartItemInput, CartStore};
use crate::config::StoreConfig;
use crate::storage::{FileStorage, StorageError, StorageSlot};
use crate::wishlist::WishlistStore;

/// Application state shared across all views.
///
/// Created once at start-up and handed to each view. Cloning is cheap
/// (`Rc`); every clone sees the same cart and wishlist. The state is
/// single-threaded and not `Send`.
#[derive(Clone)]
pub struct AppState {
    inner: Rc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl AppState {
    /// Create application state backed by files under `config.state_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state directory cannot be created.
    pub fn new(config: StoreConfig) -> Result<Self, StorageError> {
        let storage = FileStorage::open(&config.state_dir)?;
        tracing::info!(dir = %storage.dir().display(), "Opened storefront state");
        Ok(Self::with_storage(config, Rc::new(storage)))
    }

    /// Load [`StoreConfig`] from the environment and open file-backed state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the state
    /// directory cannot be created.
    pub fn from_env() -> crate::Result<Self> {
        let config = StoreConfig::from_env()?;
        Ok(Self::new(config)?)
    }

    /// Create application state on top of an existing slot.
    #[must_use]
    pub fn with_storage(config: StoreConfig, storage: Rc<dyn StorageSlot>) -> Self {
        let cart = CartStore::open(Rc::clone(&storage), &config.cart_key);
        let wishlist = WishlistStore::open(storage, &config.wishlist_key);

        Self {
            inner: Rc::new(AppStateInner {
                config,
                cart,
                wishlist,
            }),
        }
    }

    /// Get a reference to the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    /// Add a saved wishlist item to the cart at the current catalog `price`.
    ///
    /// The wishlist is left as is. Returns `false` if `id` is not saved.
    pub fn add_saved_to_cart(&self, id: &str, price: Price) -> bool {
        let Some(saved) = self.inner.wishlist.get(id) else {
            tracing::debug!(id, "Not in wishlist, nothing added to cart");
            return false;
        };

        self.inner
            .cart
            .add_item(CartItemInput::new(saved.id, saved.title, saved.image, price));
        true
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("cart", &self.inner.cart)
            .field("wishlist", &self.inner.wishlist)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use astro_store_core::ProductId;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::wishlist::WishlistItem;

    fn state() -> AppState {
        AppState::with_storage(StoreConfig::default(), Rc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_clones_share_stores() {
        let state = state();
        let view = state.clone();

        state.wishlist().toggle(WishlistItem::new(
            ProductId::parse("a").unwrap(),
            "A",
            "a.jpg",
        ));
        assert!(view.wishlist().has("a"));
    }

    #[test]
    fn test_add_saved_to_cart_uses_supplied_price() {
        let state = state();
        state.wishlist().toggle(WishlistItem::new(
            ProductId::parse("a").unwrap(),
            "A",
            "a.jpg",
        ));

        assert!(state.add_saved_to_cart("a", Price::from_cents(1999)));

        let line = state.cart().get("a").unwrap();
        assert_eq!(line.price, Price::from_cents(1999));
        assert_eq!(line.title, "A");
        assert!(state.wishlist().has("a"));
    }

    #[test]
    fn test_add_saved_to_cart_unknown_id() {
        let state = state();
        assert!(!state.add_saved_to_cart("nope", Price::ZERO));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_stores_use_configured_keys() {
        let storage = Rc::new(MemoryStorage::new());
        let config = StoreConfig {
            cart_key: "guest_cart".to_string(),
            wishlist_key: "guest_wishlist".to_string(),
            ..StoreConfig::default()
        };
        let state = AppState::with_storage(config, storage.clone());

        state.wishlist().toggle(WishlistItem::new(
            ProductId::parse("a").unwrap(),
            "A",
            "",
        ));
        state.add_saved_to_cart("a", Price::ZERO);

        assert!(storage.get("guest_cart").unwrap().is_some());
        assert!(storage.get("guest_wishlist").unwrap().is_some());
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_new_opens_file_storage() {
        let root = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            state_dir: root.path().join("state"),
            ..StoreConfig::default()
        };

        let state = AppState::new(config.clone()).unwrap();
        state.wishlist().toggle(WishlistItem::new(
            ProductId::parse("a").unwrap(),
            "A",
            "",
        ));
        drop(state);

        let reloaded = AppState::new(config).unwrap();
        assert!(reloaded.wishlist().has("a"));
    }
}
