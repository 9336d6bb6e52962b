//! Presentation formatting for prices and counts.
//!
//! Stores keep exact decimals; rounding to cents happens here, at display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as dollars with exactly two decimals.
///
/// Half-cent amounts round away from zero.
///
/// ```
/// use astro_store_storefront::filters::format_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_price(Decimal::new(3098, 2)), "$30.98");
/// assert_eq!(format_price(Decimal::new(10, 0)), "$10.00");
/// assert_eq!(format_price(Decimal::new(12345, 3)), "$12.35");
/// ```
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Pluralized item count, e.g. `"1 item"`, `"3 items"`.
#[must_use]
pub fn item_count_label(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
