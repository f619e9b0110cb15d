//! Gift line item classification.

use serde_json::Map;

use crate::domain::{
    carts::models::{LineItem, VariantId},
    gifts::models::GiftPolicy,
};

/// Title given to the synthetic gift line item.
pub const GIFT_TITLE: &str = "Free Gift";

/// Price written on the synthetic gift line item.
pub const GIFT_PRICE: &str = "0.00";

/// Title-only check, for callers that have nothing else to go on.
pub fn is_gift_title(title: &str) -> bool {
    title == GIFT_TITLE
}

/// A line item is the gift if it carries the reserved title or the gift product id.
///
/// The title check stays even though the product id is the durable key: items
/// written by older releases or edited by hand may only carry the title.
pub fn is_gift(item: &LineItem, policy: &GiftPolicy) -> bool {
    is_gift_title(&item.title) || item.product_id == Some(policy.gift_product_id)
}

/// Build the zero-price gift line item for `variant`.
pub fn gift_line_item(variant: VariantId) -> LineItem {
    LineItem {
        title: GIFT_TITLE.to_string(),
        product_id: None,
        variant_id: Some(variant),
        quantity: Some(1),
        price: Some(GIFT_PRICE.to_string()),
        passthrough: Map::new(),
    }
}
