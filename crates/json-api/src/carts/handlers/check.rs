//! Check Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use freebie_app::domain::{
    carts::models::{CartId, CartToken},
    gifts::models::{CartRef, ReconcileRequest, ReconciliationOutcome},
};

use crate::{
    carts::errors::{outcome_error, outcome_status},
    extensions::*,
    observability::{ReconcileTrigger, observe_reconciliation},
    state::State,
};

/// Check Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckCartRequest {
    /// Numeric cart (draft order) id
    #[serde(default)]
    pub cart_id: Option<u64>,

    /// Client-side cart token, used when no id is given
    #[serde(default)]
    pub cart_token: Option<String>,

    /// Observed cart value in minor units
    pub cart_value: u64,
}

impl CheckCartRequest {
    fn into_reconcile_request(self) -> Result<ReconcileRequest, StatusError> {
        let cart = match (self.cart_id, self.cart_token) {
            (Some(id), _) => CartRef::Id(CartId::new(id)),
            (None, Some(token)) if !token.trim().is_empty() => {
                CartRef::Token(CartToken::new(token.trim()))
            }
            _ => return Err(StatusError::bad_request().brief("Cart identifier is required")),
        };

        Ok(ReconcileRequest {
            cart,
            cart_value: self.cart_value,
        })
    }
}

/// Check Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckCartResponse {
    /// Outcome label, e.g. `gift-added`
    pub outcome: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<u64>,

    /// Variant added as the gift
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<u64>,

    /// Number of gift line items removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,

    /// Whether the cart holds a gift after a no-op
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gift: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ReconciliationOutcome> for CheckCartResponse {
    fn from(outcome: &ReconciliationOutcome) -> Self {
        let mut response = CheckCartResponse {
            outcome: outcome.label().to_string(),
            cart_id: None,
            variant_id: None,
            removed: None,
            has_gift: None,
            error: outcome_error(outcome).map(str::to_string),
        };

        match outcome {
            ReconciliationOutcome::GiftAdded {
                cart_id,
                variant_id,
            } => {
                response.cart_id = Some(cart_id.into_inner());
                response.variant_id = Some(variant_id.into_inner());
            }
            ReconciliationOutcome::GiftRemoved { cart_id, removed } => {
                response.cart_id = Some(cart_id.into_inner());
                response.removed = Some(*removed);
            }
            ReconciliationOutcome::NoChange { cart_id, has_gift } => {
                response.cart_id = Some(cart_id.into_inner());
                response.has_gift = Some(*has_gift);
            }
            ReconciliationOutcome::GiftProductUnavailable { cart_id } => {
                response.cart_id = Some(cart_id.into_inner());
            }
            ReconciliationOutcome::CartNotFound | ReconciliationOutcome::UpstreamError { .. } => {}
        }

        response
    }
}

/// Check Cart Handler
///
/// Brings the cart in line with the gift rule for the given cart value.
#[endpoint(
    tags("carts"),
    summary = "Check Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart reconciled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart identifier is required"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or gift product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner().into_reconcile_request()?;

    let outcome = state.app.gifts.reconcile(request).await;

    observe_reconciliation(ReconcileTrigger::CheckCart, &outcome);

    res.status_code(outcome_status(&outcome));

    Ok(Json(CheckCartResponse::from(&outcome)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use freebie_app::domain::{carts::models::VariantId, gifts::MockGiftsService};

    use crate::test_helpers::gifts_service;

    use super::*;

    fn make_service(gifts: MockGiftsService) -> Service {
        gifts_service(gifts, Router::with_path("check-cart").post(handler))
    }

    #[tokio::test]
    async fn test_check_cart_adds_gift() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .withf(|request| {
                *request
                    == ReconcileRequest {
                        cart: CartRef::Id(CartId::new(42)),
                        cart_value: 11_000,
                    }
            })
            .return_once(|_| ReconciliationOutcome::GiftAdded {
                cart_id: CartId::new(42),
                variant_id: VariantId::new(7),
            });

        let mut res = TestClient::post("http://example.com/check-cart")
            .json(&json!({ "cart_id": 42, "cart_value": 11_000 }))
            .send(&make_service(gifts))
            .await;

        let body: CheckCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.outcome, "gift-added");
        assert_eq!(body.cart_id, Some(42));
        assert_eq!(body.variant_id, Some(7));
        assert_eq!(body.error, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_check_cart_accepts_token() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .withf(|request| request.cart == CartRef::Token(CartToken::new("tok-1")))
            .return_once(|_| ReconciliationOutcome::NoChange {
                cart_id: CartId::new(3),
                has_gift: false,
            });

        let mut res = TestClient::post("http://example.com/check-cart")
            .json(&json!({ "cart_token": "tok-1", "cart_value": 5_000 }))
            .send(&make_service(gifts))
            .await;

        let body: CheckCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.outcome, "no-change");
        assert_eq!(body.has_gift, Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn test_check_cart_without_identifier_returns_400() {
        let mut gifts = MockGiftsService::new();

        gifts.expect_reconcile().never();

        let res = TestClient::post("http://example.com/check-cart")
            .json(&json!({ "cart_token": "  ", "cart_value": 5_000 }))
            .send(&make_service(gifts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_check_cart_not_found_returns_404() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .return_once(|_| ReconciliationOutcome::CartNotFound);

        let mut res = TestClient::post("http://example.com/check-cart")
            .json(&json!({ "cart_token": "missing", "cart_value": 5_000 }))
            .send(&make_service(gifts))
            .await;

        let body: CheckCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.outcome, "cart-not-found");
        assert_eq!(body.error.as_deref(), Some("Cart not found"));

        Ok(())
    }

    #[tokio::test]
    async fn test_check_cart_gift_unavailable_returns_404() {
        let mut gifts = MockGiftsService::new();

        gifts.expect_reconcile().once().return_once(|_| {
            ReconciliationOutcome::GiftProductUnavailable {
                cart_id: CartId::new(42),
            }
        });

        let res = TestClient::post("http://example.com/check-cart")
            .json(&json!({ "cart_id": 42, "cart_value": 20_000 }))
            .send(&make_service(gifts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_check_cart_upstream_error_returns_500() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .return_once(|_| ReconciliationOutcome::UpstreamError {
                message: "platform returned 502".to_string(),
            });

        let mut res = TestClient::post("http://example.com/check-cart")
            .json(&json!({ "cart_id": 42, "cart_value": 20_000 }))
            .send(&make_service(gifts))
            .await;

        let body: CheckCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error.as_deref(), Some("Error processing cart"));

        Ok(())
    }
}
