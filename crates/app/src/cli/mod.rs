use clap::{Parser, Subcommand};
use freebie_app::{
    config::{GiftArgs, ShopifyArgs},
    context::AppContext,
};
use url::Url;

mod reconcile;
mod webhook;

#[derive(Debug, Parser)]
#[command(name = "freebie-app", about = "Freebie CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile a single cart against the gift rule
    Reconcile(reconcile::ReconcileArgs),
    Webhook(webhook::WebhookCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Reconcile(args) => reconcile::run(args).await,
            Commands::Webhook(command) => webhook::run(command).await,
        }
    }
}

fn build_context(
    shopify: ShopifyArgs,
    gift: &GiftArgs,
    public_url: Option<Url>,
) -> Result<AppContext, String> {
    AppContext::from_shopify(shopify.into(), gift.into(), public_url)
        .map_err(|error| format!("failed to initialise: {error}"))
}
