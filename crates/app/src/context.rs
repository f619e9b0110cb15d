//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;
use url::Url;

use crate::{
    domain::{
        carts::ShopifyCartsRepository,
        gifts::{CartReconciler, GiftsService, models::GiftPolicy},
        webhooks::{ShopifyWebhooksService, WebhooksService},
    },
    shopify::{ShopifyClient, ShopifyConfig, ShopifyError},
};

/// Failure while building the [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The Shopify HTTP client could not be constructed.
    #[error("failed to build Shopify client")]
    Shopify(#[source] ShopifyError),
}

/// Services shared by every entry point.
#[derive(Clone)]
pub struct AppContext {
    /// Gift reconciliation.
    pub gifts: Arc<dyn GiftsService>,

    /// Webhook subscription management.
    pub webhooks: Arc<dyn WebhooksService>,

    /// Gift rule the services were built with.
    pub policy: GiftPolicy,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context backed by the Shopify Admin API.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_shopify(
        config: ShopifyConfig,
        policy: GiftPolicy,
        public_url: Option<Url>,
    ) -> Result<Self, AppInitError> {
        let client = ShopifyClient::new(config).map_err(AppInitError::Shopify)?;

        let carts = Arc::new(ShopifyCartsRepository::new(client.clone()));

        Ok(Self {
            gifts: Arc::new(CartReconciler::new(carts, policy)),
            webhooks: Arc::new(ShopifyWebhooksService::new(client, public_url)),
            policy,
        })
    }
}
