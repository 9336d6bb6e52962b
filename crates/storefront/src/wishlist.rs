//! Wishlist store.
//!
//! A set of saved product references with a single toggle mutation. Price is
//! not tracked; moving a saved item to the cart takes the price from the
//! catalog at that moment (see [`AppState::add_saved_to_cart`]).
//!
//! [`AppState::add_saved_to_cart`]: crate::state::AppState::add_saved_to_cart

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use astro_store_core::ProductId;

use crate::persist;
use crate::storage::StorageSlot;
use crate::subscription::{Subscribers, Subscription};

/// A saved product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
}

impl WishlistItem {
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
        }
    }
}

/// Toggle input. Same shape as the stored item.
pub type WishlistItemInput = WishlistItem;

/// Saved-for-later products for one storefront session.
pub struct WishlistStore {
    items: RefCell<Vec<WishlistItem>>,
    storage: Rc<dyn StorageSlot>,
    key: String,
    subscribers: Subscribers<[WishlistItem]>,
}

impl WishlistStore {
    /// Open the wishlist stored under `key`, hydrating it from `storage`.
    ///
    /// Missing or malformed stored data yields an empty wishlist. Repeated
    /// stored ids keep their first occurrence.
    #[instrument(skip(storage))]
    pub fn open(storage: Rc<dyn StorageSlot>, key: &str) -> Self {
        let mut items: Vec<WishlistItem> = persist::load(storage.as_ref(), key);
        let mut seen = std::collections::HashSet::new();
        items.retain(|item| seen.insert(item.id.clone()));
        tracing::debug!(saved = items.len(), "Wishlist hydrated");

        Self {
            items: RefCell::new(items),
            storage,
            key: key.to_string(),
            subscribers: Subscribers::new(),
        }
    }

    /// Remove `item` if its id is saved, save it otherwise.
    ///
    /// Returns whether the item is saved after the call.
    pub fn toggle(&self, item: WishlistItemInput) -> bool {
        let saved = {
            let mut items = self.items.borrow_mut();
            if let Some(pos) = items.iter().position(|saved| saved.id == item.id) {
                items.remove(pos);
                tracing::debug!(id = %item.id, "Wishlist item removed");
                false
            } else {
                tracing::debug!(id = %item.id, "Wishlist item saved");
                items.push(item);
                true
            }
        };

        self.commit();
        saved
    }

    /// Whether `id` is saved.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.items.borrow().iter().any(|item| item.id.as_str() == id)
    }

    /// Snapshot of the saved item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<WishlistItem> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.id.as_str() == id)
            .cloned()
    }

    /// Snapshot of all saved items in the order they were saved.
    #[must_use]
    pub fn items(&self) -> Vec<WishlistItem> {
        self.items.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Call `callback` with the new snapshot after every toggle.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[WishlistItem]) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    fn commit(&self) {
        let snapshot = self.items();
        persist::save(self.storage.as_ref(), &self.key, &snapshot);
        self.subscribers.notify(&snapshot);
    }
}

impl fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistStore")
            .field("key", &self.key)
            .field("items", &self.items.borrow())
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::storage::{MemoryStorage, keys};

    fn item(id: &str) -> WishlistItem {
        WishlistItem::new(ProductId::parse(id).unwrap(), id.to_uppercase(), "")
    }

    fn open() -> (Rc<MemoryStorage>, WishlistStore) {
        let storage = Rc::new(MemoryStorage::new());
        let wishlist = WishlistStore::open(storage.clone(), keys::WISHLIST);
        (storage, wishlist)
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (_, wishlist) = open();
        assert!(wishlist.toggle(item("x")));
        assert!(wishlist.has("x"));
        assert!(!wishlist.toggle(item("x")));
        assert!(!wishlist.has("x"));
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let (_, wishlist) = open();
        wishlist.toggle(item("a"));
        wishlist.toggle(item("b"));
        let before = wishlist.items();

        wishlist.toggle(item("c"));
        wishlist.toggle(item("c"));
        assert_eq!(wishlist.items(), before);

        wishlist.toggle(item("a"));
        wishlist.toggle(item("a"));
        assert!(wishlist.has("a"));
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_toggle_matches_by_id_only() {
        let (_, wishlist) = open();
        wishlist.toggle(WishlistItem::new(ProductId::parse("a").unwrap(), "Old", "old.png"));
        wishlist.toggle(WishlistItem::new(ProductId::parse("a").unwrap(), "New", "new.png"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_items_in_save_order() {
        let (_, wishlist) = open();
        for id in ["z", "m", "a"] {
            wishlist.toggle(item(id));
        }
        let ids: Vec<String> = wishlist
            .items()
            .into_iter()
            .map(|i| i.id.into_inner())
            .collect();
        assert_eq!(ids, ["z", "m", "a"]);
    }

    #[test]
    fn test_toggle_persists() {
        let (storage, wishlist) = open();
        wishlist.toggle(item("a"));

        let reopened = WishlistStore::open(storage.clone(), keys::WISHLIST);
        assert_eq!(reopened.items(), wishlist.items());

        wishlist.toggle(item("a"));
        assert_eq!(storage.get(keys::WISHLIST).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_open_drops_duplicate_ids() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .set(
                keys::WISHLIST,
                r#"[{"id":"a","title":"first","image":""},{"id":"a","title":"second","image":""}]"#,
            )
            .unwrap();

        let wishlist = WishlistStore::open(storage, keys::WISHLIST);
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist.get("a").unwrap().title, "first");
    }

    #[test]
    fn test_open_malformed_is_empty() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(keys::WISHLIST, "{broken").unwrap();
        assert!(WishlistStore::open(storage, keys::WISHLIST).is_empty());
    }

    #[test]
    fn test_subscription_notified_per_toggle() {
        let (_, wishlist) = open();
        let calls = Rc::new(Cell::new(0));
        let subscription = {
            let calls = Rc::clone(&calls);
            wishlist.subscribe(move |_| calls.set(calls.get() + 1))
        };

        wishlist.toggle(item("a"));
        wishlist.toggle(item("a"));
        drop(subscription);
        wishlist.toggle(item("a"));

        assert_eq!(calls.get(), 2);
    }
}
