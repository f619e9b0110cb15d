//! Cart Update Notification Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use freebie_app::domain::notifications::{CartNotification, RawCartNotification};

use crate::{
    extensions::*,
    observability::{ReconcileTrigger, observe_reconciliation},
    state::State,
};

/// Notification acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationAck {
    /// Always true once the body has been read
    pub received: bool,

    /// Reconciliation outcome label, absent when the payload was ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl NotificationAck {
    fn ignored() -> Self {
        Self {
            received: true,
            outcome: None,
        }
    }
}

/// Cart Update Notification Handler
///
/// Reconciles the notified cart and always acknowledges with 200 so the
/// platform does not redeliver; the real outcome is logged.
#[endpoint(
    tags("webhooks"),
    summary = "Cart Update Notification",
    responses(
        (status_code = StatusCode::OK, description = "Notification acknowledged"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<NotificationAck>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let raw = match req.parse_json::<RawCartNotification>().await {
        Ok(raw) => raw,
        Err(source) => {
            warn!("ignoring unreadable cart notification: {source}");

            return Ok(Json(NotificationAck::ignored()));
        }
    };

    let request = match CartNotification::try_from(raw).map(CartNotification::into_request) {
        Ok(request) => request,
        Err(source) => {
            warn!("ignoring cart notification: {source}");

            return Ok(Json(NotificationAck::ignored()));
        }
    };

    let outcome = state.app.gifts.reconcile(request).await;

    observe_reconciliation(ReconcileTrigger::Notification, &outcome);

    if outcome.is_success() {
        info!(outcome = outcome.label(), "cart notification processed");
    } else {
        warn!(outcome = outcome.label(), "cart notification not reconciled");
    }

    Ok(Json(NotificationAck {
        received: true,
        outcome: Some(outcome.label().to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use freebie_app::domain::{
        carts::models::{CartId, CartToken},
        gifts::{
            MockGiftsService,
            models::{CartRef, ReconcileRequest, ReconciliationOutcome},
        },
    };

    use crate::test_helpers::gifts_service;

    use super::*;

    fn make_service(gifts: MockGiftsService) -> Service {
        gifts_service(gifts, Router::with_path("webhook-handler").post(handler))
    }

    #[tokio::test]
    async fn test_notification_with_total_reconciles() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .withf(|request| {
                *request
                    == ReconcileRequest {
                        cart: CartRef::Id(CartId::new(77)),
                        cart_value: 12_050,
                    }
            })
            .return_once(|_| ReconciliationOutcome::NoChange {
                cart_id: CartId::new(77),
                has_gift: true,
            });

        let mut res = TestClient::post("http://example.com/webhook-handler")
            .json(&json!({ "id": 77, "total_price": "120.50" }))
            .send(&make_service(gifts))
            .await;

        let body: NotificationAck = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.outcome.as_deref(), Some("no-change"));

        Ok(())
    }

    #[tokio::test]
    async fn test_notification_sums_line_items_for_token() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .withf(|request| {
                *request
                    == ReconcileRequest {
                        cart: CartRef::Token(CartToken::new("c1-abc")),
                        cart_value: 4_000 + 3_000,
                    }
            })
            .return_once(|_| ReconciliationOutcome::CartNotFound);

        let res = TestClient::post("http://example.com/webhook-handler")
            .json(&json!({
                "token": "c1-abc",
                "line_items": [
                    { "line_price": "40.00" },
                    { "price": "15.00", "quantity": 2 }
                ]
            }))
            .send(&make_service(gifts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_upstream_failure_is_still_acknowledged() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .return_once(|_| ReconciliationOutcome::UpstreamError {
                message: "timeout".to_string(),
            });

        let mut res = TestClient::post("http://example.com/webhook-handler")
            .json(&json!({ "id": 5, "total_price": "200.00" }))
            .send(&make_service(gifts))
            .await;

        let body: NotificationAck = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.outcome.as_deref(), Some("upstream-error"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_total_reconciles_at_zero() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .withf(|request| {
                *request
                    == ReconcileRequest {
                        cart: CartRef::Id(CartId::new(9)),
                        cart_value: 0,
                    }
            })
            .return_once(|_| ReconciliationOutcome::GiftRemoved {
                cart_id: CartId::new(9),
                removed: 1,
            });

        let mut res = TestClient::post("http://example.com/webhook-handler")
            .json(&json!({ "id": 9, "total_price": "free" }))
            .send(&make_service(gifts))
            .await;

        let body: NotificationAck = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.outcome.as_deref(), Some("gift-removed"));

        Ok(())
    }

    #[tokio::test]
    async fn test_notification_without_value_reconciles_at_zero() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts
            .expect_reconcile()
            .once()
            .withf(|request| request.cart_value == 0)
            .return_once(|_| ReconciliationOutcome::NoChange {
                cart_id: CartId::new(9),
                has_gift: false,
            });

        let res = TestClient::post("http://example.com/webhook-handler")
            .json(&json!({ "id": 9 }))
            .send(&make_service(gifts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_notification_without_identity_is_acknowledged() -> TestResult {
        let mut gifts = MockGiftsService::new();

        gifts.expect_reconcile().never();

        let mut res = TestClient::post("http://example.com/webhook-handler")
            .json(&json!({ "total_price": "200.00" }))
            .send(&make_service(gifts))
            .await;

        let body: NotificationAck = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.received, "expected receipt to be acknowledged");
        assert_eq!(body.outcome, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_body_is_acknowledged() {
        let mut gifts = MockGiftsService::new();

        gifts.expect_reconcile().never();

        let res = TestClient::post("http://example.com/webhook-handler")
            .text("not json")
            .send(&make_service(gifts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }
}
