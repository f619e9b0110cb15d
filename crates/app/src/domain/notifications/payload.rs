//! Cart update notification payloads.
//!
//! Platform versions disagree on what a cart notification carries: some send a
//! precomputed `total_price`, others only the line items. The raw body is read
//! with every field optional and then classified by which fields are present.
//! A value that is absent or cannot be read counts as zero; the cart is still
//! reconciled.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    domain::{
        carts::models::{CartId, CartToken},
        gifts::models::{CartRef, ReconcileRequest},
        notifications::errors::NotificationError,
    },
    money,
};

/// Notification body exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCartNotification {
    /// Cart id (number) or, on some platform versions, the cart token.
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub token: Option<String>,

    /// Platform-computed total, usually a decimal string.
    #[serde(default)]
    pub total_price: Option<Value>,

    #[serde(default)]
    pub line_items: Option<Vec<NotifiedLineItem>>,
}

/// Line item as it appears in a notification. Only the amount fields are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifiedLineItem {
    /// Total for the line, preferred when present.
    #[serde(default)]
    pub line_price: Option<Value>,

    /// Unit price.
    #[serde(default)]
    pub price: Option<Value>,

    #[serde(default)]
    pub quantity: Option<Value>,
}

/// Where the cart value of a notification comes from.
#[derive(Debug, Clone)]
pub enum CartValueSource {
    /// Total already computed by the platform.
    Totalled(Value),

    /// Line items to be summed locally.
    Itemised(Vec<NotifiedLineItem>),

    /// Neither a total nor line items; valued at zero.
    Absent,
}

/// A classified cart notification.
#[derive(Debug, Clone)]
pub struct CartNotification {
    /// Cart the notification is about.
    pub cart: CartRef,

    /// Where its value comes from.
    pub value: CartValueSource,
}

impl CartNotification {
    /// Cart value in minor units.
    ///
    /// An unreadable platform total, a missing value, and unreadable line items
    /// all count as zero.
    pub fn cart_value(&self) -> u64 {
        match &self.value {
            CartValueSource::Totalled(total) => amount_minor_units(total).unwrap_or_else(|| {
                warn!(
                    cart = %self.cart,
                    %total,
                    "notification total is not an amount, valuing cart at zero"
                );

                0
            }),
            CartValueSource::Itemised(items) => items
                .iter()
                .map(NotifiedLineItem::line_total)
                .fold(0_u64, u64::saturating_add),
            CartValueSource::Absent => {
                warn!(
                    cart = %self.cart,
                    "notification carries neither a total nor line items, valuing cart at zero"
                );

                0
            }
        }
    }

    /// Turn the notification into a reconciliation request.
    pub fn into_request(self) -> ReconcileRequest {
        let cart_value = self.cart_value();

        ReconcileRequest {
            cart: self.cart,
            cart_value,
        }
    }
}

impl TryFrom<RawCartNotification> for CartNotification {
    type Error = NotificationError;

    fn try_from(raw: RawCartNotification) -> Result<Self, Self::Error> {
        let cart = cart_ref(raw.id.as_ref(), raw.token.as_deref())
            .ok_or(NotificationError::MissingIdentity)?;

        let value = match (raw.total_price, raw.line_items) {
            (Some(total), _) if !total.is_null() => CartValueSource::Totalled(total),
            (_, Some(items)) => CartValueSource::Itemised(items),
            _ => CartValueSource::Absent,
        };

        Ok(Self { cart, value })
    }
}

impl NotifiedLineItem {
    /// Line total in minor units; zero when it cannot be read.
    pub fn line_total(&self) -> u64 {
        if let Some(line_price) = self.line_price.as_ref().and_then(amount_minor_units) {
            return line_price;
        }

        let unit = self.price.as_ref().and_then(amount_minor_units);
        let quantity = self.quantity.as_ref().and_then(quantity);

        match (unit, quantity) {
            (Some(unit), Some(quantity)) => unit.saturating_mul(quantity),
            _ => 0,
        }
    }
}

/// Numeric ids name a cart directly, including all-digit strings such as
/// `"1045331"`; any other non-blank string is a client token. The `token`
/// field is used only when `id` names nothing.
fn cart_ref(id: Option<&Value>, token: Option<&str>) -> Option<CartRef> {
    match id {
        Some(Value::Number(number)) => {
            if let Some(id) = number.as_u64() {
                return Some(CartRef::Id(CartId::new(id)));
            }
        }
        Some(Value::String(text)) if !text.trim().is_empty() => {
            return Some(match text.parse::<CartId>() {
                Ok(id) => CartRef::Id(id),
                Err(_) => CartRef::Token(CartToken::new(text.trim())),
            });
        }
        _ => {}
    }

    token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| CartRef::Token(CartToken::new(token)))
}

fn amount_minor_units(value: &Value) -> Option<u64> {
    match value {
        Value::String(text) => money::parse_minor_units(text).ok(),
        Value::Number(number) => money::parse_minor_units(&number.to_string()).ok(),
        _ => None,
    }
}

fn quantity(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
