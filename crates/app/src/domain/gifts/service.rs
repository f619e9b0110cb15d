//! Gift reconciliation service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info, warn};

use crate::domain::{
    carts::{
        CartsRepository, CartsRepositoryError,
        models::{CartId, LineItem, VariantId},
    },
    gifts::{
        models::{CartRef, GiftPolicy, ReconcileRequest, ReconciliationOutcome},
        plan::GiftPlan,
        predicate::gift_line_item,
    },
};

/// Reconciler over a [`CartsRepository`].
///
/// Each call is one complete read-decide-write cycle: an optional token
/// lookup, one cart fetch, and at most one line item replace. Nothing is kept
/// between calls, so replaying a call against an unchanged cart is a no-op.
#[derive(Clone)]
pub struct CartReconciler {
    carts: Arc<dyn CartsRepository>,
    policy: GiftPolicy,
}

impl Debug for CartReconciler {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartReconciler")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CartReconciler {
    /// Build a reconciler applying `policy` through `carts`.
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, policy: GiftPolicy) -> Self {
        Self { carts, policy }
    }

    async fn resolve(&self, cart: &CartRef) -> Result<CartId, CartsRepositoryError> {
        match cart {
            CartRef::Id(id) => Ok(*id),
            CartRef::Token(token) => self.carts.resolve_cart_id(token).await,
        }
    }

    async fn add_gift(
        &self,
        cart_id: CartId,
        mut line_items: Vec<LineItem>,
    ) -> Result<VariantId, CartsRepositoryError> {
        let variant = self
            .carts
            .fetch_gift_variant(self.policy.gift_product_id)
            .await?;

        line_items.push(gift_line_item(variant));

        self.carts.replace_line_items(cart_id, line_items).await?;

        Ok(variant)
    }
}

#[async_trait]
impl GiftsService for CartReconciler {
    #[tracing::instrument(
        name = "gifts.reconcile",
        skip(self, request),
        fields(cart = %request.cart, cart_value = request.cart_value)
    )]
    async fn reconcile(&self, request: ReconcileRequest) -> ReconciliationOutcome {
        let cart_id = match self.resolve(&request.cart).await {
            Ok(cart_id) => cart_id,
            Err(source) => return lookup_failure(source),
        };

        let cart = match self.carts.fetch_cart(cart_id).await {
            Ok(cart) => cart,
            Err(source) => return cart_failure(cart_id, source),
        };

        match GiftPlan::for_cart(&cart, request.cart_value, &self.policy) {
            GiftPlan::Keep { has_gift } => ReconciliationOutcome::NoChange { cart_id, has_gift },
            GiftPlan::Add => match self.add_gift(cart_id, cart.line_items).await {
                Ok(variant_id) => {
                    info!(%cart_id, %variant_id, "free gift added to cart");

                    ReconciliationOutcome::GiftAdded {
                        cart_id,
                        variant_id,
                    }
                }
                Err(source) => cart_failure(cart_id, source),
            },
            GiftPlan::Remove { retained, removed } => {
                match self.carts.replace_line_items(cart_id, retained).await {
                    Ok(()) => {
                        info!(%cart_id, removed, "free gift removed from cart");

                        ReconciliationOutcome::GiftRemoved { cart_id, removed }
                    }
                    Err(source) => cart_failure(cart_id, source),
                }
            }
        }
    }
}

/// Outcome for a failed token lookup, before any cart id is known.
fn lookup_failure(error: CartsRepositoryError) -> ReconciliationOutcome {
    match error {
        CartsRepositoryError::NotFound => ReconciliationOutcome::CartNotFound,
        CartsRepositoryError::GiftUnavailable => {
            error!("cart lookup failed: {error}");

            ReconciliationOutcome::UpstreamError {
                message: error.to_string(),
            }
        }
        CartsRepositoryError::Upstream(source) => {
            error!("cart lookup aborted by platform error: {source}");

            ReconciliationOutcome::UpstreamError {
                message: source.to_string(),
            }
        }
    }
}

/// Outcome for a failure once the cart id is known.
fn cart_failure(cart_id: CartId, error: CartsRepositoryError) -> ReconciliationOutcome {
    match error {
        CartsRepositoryError::NotFound => ReconciliationOutcome::CartNotFound,
        CartsRepositoryError::GiftUnavailable => {
            warn!(%cart_id, "gift product is missing or has no variants");

            ReconciliationOutcome::GiftProductUnavailable { cart_id }
        }
        CartsRepositoryError::Upstream(source) => {
            error!(%cart_id, "reconciliation aborted by platform error: {source}");

            ReconciliationOutcome::UpstreamError {
                message: source.to_string(),
            }
        }
    }
}

/// Gift reconciliation entry point.
#[automock]
#[async_trait]
pub trait GiftsService: Send + Sync {
    /// Bring the referenced cart's gift line item in line with `cart_value`.
    async fn reconcile(&self, request: ReconcileRequest) -> ReconciliationOutcome;
}
