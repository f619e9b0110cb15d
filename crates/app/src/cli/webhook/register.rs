use clap::Args;
use freebie_app::config::{GiftArgs, ShopifyArgs};
use url::Url;

#[derive(Debug, Args)]
pub(crate) struct RegisterWebhookArgs {
    /// Public base URL of the JSON server
    #[arg(long, env = "WEBHOOK_CALLBACK_URL")]
    callback_url: Url,

    #[command(flatten)]
    shopify: ShopifyArgs,

    #[command(flatten)]
    gift: GiftArgs,
}

pub(crate) async fn run(args: RegisterWebhookArgs) -> Result<(), String> {
    let context = crate::cli::build_context(args.shopify, &args.gift, Some(args.callback_url))?;

    let subscription = context
        .webhooks
        .register_cart_updates()
        .await
        .map_err(|error| format!("failed to register webhook: {error}"))?;

    println!("webhook_id: {}", subscription.id);
    println!("topic: {}", subscription.topic);
    println!("address: {}", subscription.address);

    Ok(())
}
