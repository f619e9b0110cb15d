//! Webhook Models

/// Topic the service subscribes to.
pub const CART_UPDATE_TOPIC: &str = "carts/update";

/// Path, relative to the public base URL, that receives cart notifications.
pub const NOTIFICATION_PATH: &str = "webhook-handler";

/// Webhook subscription held by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSubscription {
    /// Subscription id.
    pub id: u64,

    /// Subscribed topic.
    pub topic: String,

    /// Callback URL notifications are posted to.
    pub address: String,
}
