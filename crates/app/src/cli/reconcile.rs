use clap::Args;
use freebie_app::{
    config::{GiftArgs, ShopifyArgs},
    domain::{
        carts::models::{CartId, CartToken},
        gifts::models::{CartRef, ReconcileRequest},
    },
};

#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("cart").required(true).args(["cart_id", "cart_token"])))]
pub(crate) struct ReconcileArgs {
    /// Numeric cart id
    #[arg(long)]
    cart_id: Option<CartId>,

    /// Client-side cart token, resolved by scanning open carts
    #[arg(long)]
    cart_token: Option<String>,

    /// Observed cart value in minor units
    #[arg(long)]
    cart_value: u64,

    #[command(flatten)]
    shopify: ShopifyArgs,

    #[command(flatten)]
    gift: GiftArgs,
}

pub(crate) async fn run(args: ReconcileArgs) -> Result<(), String> {
    let cart = cart_ref(args.cart_id, args.cart_token)?;
    let context = crate::cli::build_context(args.shopify, &args.gift, None)?;

    let outcome = context
        .gifts
        .reconcile(ReconcileRequest {
            cart,
            cart_value: args.cart_value,
        })
        .await;

    let rendered = serde_json::to_string_pretty(&outcome)
        .map_err(|error| format!("failed to render outcome: {error}"))?;

    println!("{rendered}");

    if outcome.is_success() {
        Ok(())
    } else {
        Err(format!("reconciliation did not complete: {}", outcome.label()))
    }
}

fn cart_ref(cart_id: Option<CartId>, cart_token: Option<String>) -> Result<CartRef, String> {
    match (cart_id, cart_token) {
        (Some(id), _) => Ok(CartRef::Id(id)),
        (None, Some(token)) if !token.trim().is_empty() => {
            Ok(CartRef::Token(CartToken::new(token.trim())))
        }
        _ => Err("either cart-id or a non-empty cart-token is required".to_string()),
    }
}
