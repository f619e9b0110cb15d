//! Cart and line item builders for tests.

use serde_json::Map;

use crate::domain::{
    carts::models::{Cart, CartId, LineItem, ProductId, VariantId},
    gifts::predicate::gift_line_item,
};

pub(crate) fn product_item(title: &str, quantity: u32, price: &str) -> LineItem {
    LineItem {
        title: title.to_string(),
        product_id: Some(ProductId::new(501)),
        variant_id: None,
        quantity: Some(quantity),
        price: Some(price.to_string()),
        passthrough: Map::new(),
    }
}

pub(crate) fn gift_item(variant: VariantId) -> LineItem {
    gift_line_item(variant)
}

pub(crate) fn cart_with(id: u64, line_items: Vec<LineItem>) -> Cart {
    Cart {
        id: CartId::new(id),
        token: None,
        line_items,
        subtotal: None,
    }
}
