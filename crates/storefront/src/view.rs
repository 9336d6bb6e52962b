//! Display-ready snapshots for the view layer.
//!
//! Views render these instead of raw store items so that every price string
//! goes through [`format_price`](crate::filters::format_price).

use astro_store_core::{Variant, saturating_sum};

use crate::cart::CartItem;
use crate::filters::{format_price, item_count_label};

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image: String,
    /// e.g. `"key · Global"`; `None` when the line has no variant tags.
    pub variant_label: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    pub item_count_label: String,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&[] as &[CartItem])
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&[CartItem]> for CartView {
    fn from(items: &[CartItem]) -> Self {
        let item_count = items.iter().map(|i| u64::from(i.quantity.get())).sum();
        let subtotal = saturating_sum(items.iter().map(CartItem::line_total));

        Self {
            items: items.iter().map(CartItemView::from).collect(),
            subtotal: format_price(subtotal),
            item_count,
            item_count_label: item_count_label(item_count),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            image: item.image.clone(),
            variant_label: variant_label(&item.variant),
            quantity: item.quantity.get(),
            price: format_price(item.price.amount()),
            line_price: format_price(item.line_total()),
        }
    }
}

fn variant_label(variant: &Variant) -> Option<String> {
    let parts: Vec<&str> = [variant.kind.as_deref(), variant.region.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}
