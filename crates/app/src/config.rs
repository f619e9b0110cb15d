//! Shared command line and environment settings.
//!
//! Both the JSON server and the CLI flatten these groups into their own parsers.

use clap::Args;
use url::Url;

use crate::{
    domain::{carts::models::ProductId, gifts::models::GiftPolicy},
    shopify::ShopifyConfig,
};

/// Default threshold, in minor units.
pub const DEFAULT_GIFT_THRESHOLD: u64 = 11_000;

/// Shopify connection settings.
#[derive(Debug, Clone, Args)]
pub struct ShopifyArgs {
    /// Store domain, e.g. example.myshopify.com
    #[arg(long, env = "SHOPIFY_STORE")]
    pub shopify_store: String,

    /// Admin API access token
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub shopify_access_token: String,

    /// Admin API version used for every call
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = "2023-10")]
    pub shopify_api_version: String,

    /// Override for the API origin (defaults to https://<store>)
    #[arg(long, env = "SHOPIFY_BASE_URL")]
    pub shopify_base_url: Option<String>,
}

impl From<ShopifyArgs> for ShopifyConfig {
    fn from(args: ShopifyArgs) -> Self {
        Self {
            store: args.shopify_store,
            access_token: args.shopify_access_token,
            api_version: args.shopify_api_version,
            base_url: args.shopify_base_url,
        }
    }
}

/// Gift rule settings.
#[derive(Debug, Clone, Args)]
pub struct GiftArgs {
    /// Numeric id of the gift product
    #[arg(long, env = "GIFT_PRODUCT_ID")]
    pub gift_product_id: ProductId,

    /// Minimum cart value, in minor units, that earns the gift
    #[arg(long, env = "GIFT_THRESHOLD", default_value_t = DEFAULT_GIFT_THRESHOLD)]
    pub gift_threshold: u64,
}

impl From<&GiftArgs> for GiftPolicy {
    fn from(args: &GiftArgs) -> Self {
        Self {
            threshold: args.gift_threshold,
            gift_product_id: args.gift_product_id,
        }
    }
}

/// Webhook settings.
#[derive(Debug, Clone, Args)]
pub struct WebhookArgs {
    /// Public base URL of this service; the notification path is appended
    #[arg(long, env = "WEBHOOK_CALLBACK_URL")]
    pub webhook_callback_url: Option<Url>,
}
