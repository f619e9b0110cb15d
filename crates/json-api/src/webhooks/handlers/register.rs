//! Register Webhook Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use freebie_app::domain::webhooks::models::WebhookSubscription;

use crate::{extensions::*, state::State, webhooks::errors::into_status_error};

/// Webhook Registered Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WebhookRegisteredResponse {
    /// Platform id of the subscription
    pub webhook_id: u64,

    /// Subscribed topic
    pub topic: String,

    /// Address the platform will deliver notifications to
    pub callback_url: String,
}

impl From<WebhookSubscription> for WebhookRegisteredResponse {
    fn from(subscription: WebhookSubscription) -> Self {
        WebhookRegisteredResponse {
            webhook_id: subscription.id,
            topic: subscription.topic,
            callback_url: subscription.address,
        }
    }
}

/// Register Webhook Handler
///
/// Subscribes this service to cart update notifications.
#[endpoint(
    tags("webhooks"),
    summary = "Register Webhook",
    responses(
        (status_code = StatusCode::OK, description = "Webhook registered"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Callback URL is not configured"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Error setting up webhook"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<WebhookRegisteredResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subscription = state
        .app
        .webhooks
        .register_cart_updates()
        .await
        .map_err(into_status_error)?;

    Ok(Json(subscription.into()))
}
