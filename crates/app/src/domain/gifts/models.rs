//! Gift Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::domain::carts::models::{CartId, CartToken, ProductId, VariantId};

/// Process-wide gift rule, built once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiftPolicy {
    /// Minimum cart value, in minor units, that earns the gift.
    pub threshold: u64,

    /// Product whose first variant is added as the gift.
    pub gift_product_id: ProductId,
}

/// How a caller names the cart to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartRef {
    /// Draft order id.
    Id(CartId),

    /// Client-side cart token, resolved to an id before fetching.
    Token(CartToken),
}

impl Display for CartRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Id(id) => write!(f, "id:{id}"),
            Self::Token(token) => write!(f, "token:{token}"),
        }
    }
}

/// Reconciliation Request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    /// Cart to reconcile.
    pub cart: CartRef,

    /// Cart value observed by the caller, in minor units.
    pub cart_value: u64,
}

/// Result of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ReconciliationOutcome {
    /// The gift line item was appended.
    GiftAdded {
        /// Reconciled cart.
        cart_id: CartId,
        /// Variant added as the gift.
        variant_id: VariantId,
    },
    /// Every gift-like line item was removed in one write.
    GiftRemoved {
        /// Reconciled cart.
        cart_id: CartId,
        /// Number of line items removed.
        removed: usize,
    },
    /// The cart was already in its target state and was not written.
    NoChange {
        /// Reconciled cart.
        cart_id: CartId,
        /// Whether the cart holds a gift.
        has_gift: bool,
    },
    /// No cart matches the given id or token.
    CartNotFound,
    /// The gift product is missing or has no variants.
    GiftProductUnavailable {
        /// Cart that qualified for the gift.
        cart_id: CartId,
    },
    /// A platform call failed.
    UpstreamError {
        /// Platform error description.
        message: String,
    },
}

impl ReconciliationOutcome {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::GiftAdded { .. } => "gift-added",
            Self::GiftRemoved { .. } => "gift-removed",
            Self::NoChange { .. } => "no-change",
            Self::CartNotFound => "cart-not-found",
            Self::GiftProductUnavailable { .. } => "gift-product-unavailable",
            Self::UpstreamError { .. } => "upstream-error",
        }
    }

    /// Whether the outcome leaves the cart in its target state.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::GiftAdded { .. } | Self::GiftRemoved { .. } | Self::NoChange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn outcome_serialises_with_kebab_case_tag() -> TestResult {
        let outcome = ReconciliationOutcome::GiftAdded {
            cart_id: CartId::new(1),
            variant_id: VariantId::new(2),
        };

        assert_eq!(
            serde_json::to_value(&outcome)?,
            json!({ "outcome": "gift-added", "cart_id": 1, "variant_id": 2 })
        );

        assert_eq!(
            serde_json::to_value(ReconciliationOutcome::CartNotFound)?,
            json!({ "outcome": "cart-not-found" })
        );

        Ok(())
    }

    #[test]
    fn label_matches_serialised_tag() -> TestResult {
        let outcome = ReconciliationOutcome::GiftProductUnavailable {
            cart_id: CartId::new(3),
        };

        let value = serde_json::to_value(&outcome)?;

        assert_eq!(value.get("outcome"), Some(&json!(outcome.label())));

        Ok(())
    }
}
