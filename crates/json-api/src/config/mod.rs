//! Server configuration module

use clap::Parser;

use freebie_app::config::{GiftArgs, ShopifyArgs, WebhookArgs};

use crate::config::{
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod observability;
pub(crate) mod server;

/// Freebie JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "freebie-json", about = "Freebie JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Shopify Admin API settings.
    #[command(flatten)]
    pub shopify: ShopifyArgs,

    /// Gift rule settings.
    #[command(flatten)]
    pub gift: GiftArgs,

    /// Webhook registration settings.
    #[command(flatten)]
    pub webhook: WebhookArgs,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
