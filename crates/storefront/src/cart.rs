//! Cart store.
//!
//! The cart is an ordered collection of line items keyed by product id.
//! Adding an id that is already present bumps its quantity; quantities never
//! drop below one through [`CartStore::set_quantity`]. Every mutation writes
//! the whole collection to the storage slot and then notifies subscribers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use astro_store_core::{Price, ProductId, Quantity, Variant, saturating_sum};

use crate::persist;
use crate::storage::StorageSlot;
use crate::subscription::{Subscribers, Subscription};

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    /// Image URI.
    #[serde(default)]
    pub image: String,
    /// Unit price at the time the item was added.
    pub price: Price,
    pub quantity: Quantity,
    #[serde(flatten)]
    pub variant: Variant,
}

impl CartItem {
    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }
}

/// Request to add a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemInput {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Price,
    /// Amount to add. `None` adds one.
    pub quantity: Option<Quantity>,
    pub variant: Variant,
}

impl CartItemInput {
    /// Create an input adding one unit with no variant tags.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        image: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
            price,
            quantity: None,
            variant: Variant::default(),
        }
    }

    /// Add `quantity` units instead of one. Zero is treated as one.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(Quantity::new(quantity));
        self
    }

    /// Attach variant tags.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

/// Authoritative cart state for one storefront session.
pub struct CartStore {
    items: RefCell<Vec<CartItem>>,
    storage: Rc<dyn StorageSlot>,
    key: String,
    subscribers: Subscribers<[CartItem]>,
}

impl CartStore {
    /// Open the cart stored under `key`, hydrating it from `storage`.
    ///
    /// Missing or malformed stored data yields an empty cart. Stored lines
    /// sharing an id are merged, summing their quantities.
    #[instrument(skip(storage))]
    pub fn open(storage: Rc<dyn StorageSlot>, key: &str) -> Self {
        let items = merge_duplicates(persist::load(storage.as_ref(), key));
        tracing::debug!(lines = items.len(), "Cart hydrated");

        Self {
            items: RefCell::new(items),
            storage,
            key: key.to_string(),
            subscribers: Subscribers::new(),
        }
    }

    /// Add a product, or bump its quantity if the id is already in the cart.
    ///
    /// A repeated id keeps the title, image, price and variant of the
    /// existing line.
    pub fn add_item(&self, input: CartItemInput) {
        let amount = input.quantity.unwrap_or_default();
        {
            let mut items = self.items.borrow_mut();
            if let Some(line) = items.iter_mut().find(|line| line.id == input.id) {
                line.quantity = line.quantity.saturating_add(amount);
                tracing::debug!(id = %line.id, quantity = %line.quantity, "Cart line incremented");
            } else {
                tracing::debug!(id = %input.id, quantity = %amount, "Cart line added");
                items.push(CartItem {
                    id: input.id,
                    title: input.title,
                    image: input.image,
                    price: input.price,
                    quantity: amount,
                    variant: input.variant,
                });
            }
        }
        self.commit();
    }

    /// Remove the line for `id`. Absent ids are ignored.
    pub fn remove_item(&self, id: &str) {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|line| line.id.as_str() != id);
            items.len() != before
        };

        if removed {
            tracing::debug!(id, "Cart line removed");
            self.commit();
        }
    }

    /// Set the quantity of `id`, clamping values below one to one.
    /// Absent ids are ignored.
    pub fn set_quantity(&self, id: &str, quantity: u32) {
        let quantity = Quantity::new(quantity);
        let found = {
            let mut items = self.items.borrow_mut();
            match items.iter_mut().find(|line| line.id.as_str() == id) {
                Some(line) => {
                    line.quantity = quantity;
                    true
                }
                None => false,
            }
        };

        if found {
            tracing::debug!(id, %quantity, "Cart line quantity set");
            self.commit();
        }
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        tracing::debug!("Cart cleared");
        self.commit();
    }

    /// Snapshot of all lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.borrow().clone()
    }

    /// Snapshot of the line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<CartItem> {
        self.items
            .borrow()
            .iter()
            .find(|line| line.id.as_str() == id)
            .cloned()
    }

    /// Whether the cart has a line for `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.borrow().iter().any(|line| line.id.as_str() == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .borrow()
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Sum of `price * quantity` across all lines, unrounded.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        saturating_sum(self.items.borrow().iter().map(CartItem::line_total))
    }

    /// Call `callback` with the new snapshot after every change.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[CartItem]) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    fn commit(&self) {
        let snapshot = self.items();
        persist::save(self.storage.as_ref(), &self.key, &snapshot);
        self.subscribers.notify(&snapshot);
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items.borrow())
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

fn merge_duplicates(lines: Vec<CartItem>) -> Vec<CartItem> {
    let mut merged: Vec<CartItem> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(existing) = merged.iter_mut().find(|m| m.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
        } else {
            merged.push(line);
        }
    }
    merged
}
