//! Webhooks service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use url::Url;

use crate::{
    domain::webhooks::{
        errors::WebhooksServiceError,
        models::{CART_UPDATE_TOPIC, NOTIFICATION_PATH, WebhookSubscription},
    },
    shopify::ShopifyClient,
};

/// Webhook subscriptions managed through the Admin API.
#[derive(Debug, Clone)]
pub struct ShopifyWebhooksService {
    client: ShopifyClient,
    public_url: Option<Url>,
}

impl ShopifyWebhooksService {
    /// `public_url` is the externally reachable base URL of this service.
    #[must_use]
    pub fn new(client: ShopifyClient, public_url: Option<Url>) -> Self {
        Self { client, public_url }
    }
}

#[async_trait]
impl WebhooksService for ShopifyWebhooksService {
    async fn register_cart_updates(&self) -> Result<WebhookSubscription, WebhooksServiceError> {
        let public_url = self
            .public_url
            .as_ref()
            .ok_or(WebhooksServiceError::MissingCallbackUrl)?;

        let address = callback_url(public_url)?;

        let webhook = self
            .client
            .create_webhook(CART_UPDATE_TOPIC, address.as_str())
            .await?;

        info!(webhook_id = webhook.id, address = %webhook.address, "registered cart update webhook");

        Ok(WebhookSubscription {
            id: webhook.id,
            topic: webhook.topic,
            address: webhook.address,
        })
    }
}

/// Append the notification path to the public base URL, once.
pub fn callback_url(public_url: &Url) -> Result<Url, WebhooksServiceError> {
    if public_url.path_segments().and_then(|mut segments| segments.next_back())
        == Some(NOTIFICATION_PATH)
    {
        return Ok(public_url.clone());
    }

    let mut url = public_url.clone();

    url.path_segments_mut()
        .map_err(|()| WebhooksServiceError::InvalidCallbackUrl(public_url.to_string()))?
        .pop_if_empty()
        .push(NOTIFICATION_PATH);

    Ok(url)
}

/// Webhook subscription management.
#[automock]
#[async_trait]
pub trait WebhooksService: Send + Sync {
    /// Subscribe this service to the platform's cart update notifications.
    async fn register_cart_updates(&self) -> Result<WebhookSubscription, WebhooksServiceError>;
}
