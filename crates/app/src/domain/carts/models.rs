//! Cart Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::TypedId;

/// Cart Id
pub type CartId = TypedId<Cart>;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Variant Id
pub type VariantId = TypedId<Variant>;

/// Product marker
#[derive(Debug)]
pub struct Product;

/// Variant marker
#[derive(Debug)]
pub struct Variant;

/// Opaque client-side cart token, used to find a cart whose id is not known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartToken(String);

impl CartToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CartToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Draft order id.
    pub id: CartId,

    /// Client-side cart token, when the platform recorded one.
    pub token: Option<CartToken>,

    /// Line items in platform order.
    pub line_items: Vec<LineItem>,

    /// Platform-computed subtotal in minor units, when it could be read.
    pub subtotal: Option<u64>,
}

/// LineItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Display title.
    pub title: String,

    /// Product id; absent for custom line items.
    pub product_id: Option<ProductId>,

    /// Variant id; absent for custom line items.
    pub variant_id: Option<VariantId>,

    /// Quantity, when given.
    pub quantity: Option<u32>,

    /// Unit price as the platform's decimal string.
    pub price: Option<String>,

    /// Platform fields carried through a line item replace untouched.
    pub passthrough: Map<String, Value>,
}
