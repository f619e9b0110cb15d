//! Admin API wire shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Draft order line item as returned by and sent to the Admin API.
///
/// Fields this service does not interpret are kept in `rest` so a full
/// line-item replace writes them back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemPayload {
    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Product id, `null` for custom line items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    /// Variant id, `null` for custom line items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<u64>,

    /// Quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Unit price as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    /// Fields not listed above.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Draft order as returned by the Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftOrderPayload {
    /// Draft order id.
    pub id: u64,

    /// Token of the storefront cart the draft order came from.
    #[serde(default)]
    pub cart_token: Option<String>,

    /// Line items in platform order.
    #[serde(default)]
    pub line_items: Vec<LineItemPayload>,

    /// Subtotal as a decimal string.
    #[serde(default)]
    pub subtotal_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DraftOrderEnvelope {
    pub draft_order: DraftOrderPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DraftOrdersEnvelope {
    #[serde(default)]
    pub draft_orders: Vec<DraftOrderPayload>,
}

/// One page of the open draft order listing.
#[derive(Debug, Clone)]
pub struct DraftOrderPage {
    /// Draft orders on this page.
    pub draft_orders: Vec<DraftOrderPayload>,

    /// Cursor for the following page, taken from the `Link` header.
    pub next_page_info: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DraftOrderUpdate<'a> {
    pub draft_order: LineItemsUpdate<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LineItemsUpdate<'a> {
    pub line_items: &'a [LineItemPayload],
}

/// Product with its variants.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    /// Product id.
    pub id: u64,

    /// Variants in platform order.
    #[serde(default)]
    pub variants: Vec<VariantPayload>,
}

/// Product variant.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantPayload {
    /// Variant id.
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductEnvelope {
    pub product: ProductPayload,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewWebhookRequest<'a> {
    pub webhook: NewWebhook<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewWebhook<'a> {
    pub topic: &'a str,
    pub address: &'a str,
    pub format: &'static str,
}

/// Webhook subscription as created by the Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Subscription id.
    pub id: u64,

    /// Subscribed topic, e.g. `draft_orders/update`.
    pub topic: String,

    /// Callback URL.
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebhookEnvelope {
    pub webhook: WebhookPayload,
}
