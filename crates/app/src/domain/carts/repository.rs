//! Carts repository.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    domain::carts::{
        errors::CartsRepositoryError,
        models::{Cart, CartId, CartToken, LineItem, ProductId, VariantId},
    },
    money,
    shopify::{
        ShopifyClient,
        payloads::{DraftOrderPayload, LineItemPayload},
    },
};

/// Cart repository backed by Shopify draft orders.
#[derive(Debug, Clone)]
pub struct ShopifyCartsRepository {
    client: ShopifyClient,
}

impl ShopifyCartsRepository {
    /// Wrap a Shopify client.
    #[must_use]
    pub fn new(client: ShopifyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CartsRepository for ShopifyCartsRepository {
    async fn resolve_cart_id(&self, token: &CartToken) -> Result<CartId, CartsRepositoryError> {
        let mut page_info: Option<String> = None;
        let mut pages = 0_usize;

        loop {
            let page = self.client.list_draft_orders(page_info.as_deref()).await?;

            pages += 1;

            let found = page
                .draft_orders
                .iter()
                .find(|order| order.cart_token.as_deref() == Some(token.as_str()));

            if let Some(order) = found {
                return Ok(CartId::new(order.id));
            }

            match page.next_page_info {
                Some(next) => page_info = Some(next),
                None => {
                    debug!(%token, pages, "cart token not found in open draft orders");

                    return Err(CartsRepositoryError::NotFound);
                }
            }
        }
    }

    async fn fetch_cart(&self, cart: CartId) -> Result<Cart, CartsRepositoryError> {
        self.client
            .get_draft_order(cart.into_inner())
            .await?
            .map(Cart::from)
            .ok_or(CartsRepositoryError::NotFound)
    }

    async fn fetch_gift_variant(
        &self,
        product: ProductId,
    ) -> Result<VariantId, CartsRepositoryError> {
        self.client
            .get_product(product.into_inner())
            .await?
            .and_then(|product| product.variants.first().map(|variant| variant.id))
            .map(VariantId::new)
            .ok_or(CartsRepositoryError::GiftUnavailable)
    }

    async fn replace_line_items(
        &self,
        cart: CartId,
        line_items: Vec<LineItem>,
    ) -> Result<(), CartsRepositoryError> {
        let payload: Vec<LineItemPayload> = line_items.into_iter().map(Into::into).collect();

        self.client
            .update_draft_order_line_items(cart.into_inner(), &payload)
            .await?;

        Ok(())
    }
}

/// Read and write access to carts held by the commerce platform.
///
/// Every method is one upstream call (or, for token lookup, one listing walk)
/// and is never retried.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Find the id of the open cart carrying `token`, scanning every page.
    async fn resolve_cart_id(&self, token: &CartToken) -> Result<CartId, CartsRepositoryError>;

    /// Fetch a cart and its line items.
    async fn fetch_cart(&self, cart: CartId) -> Result<Cart, CartsRepositoryError>;

    /// Resolve the first sellable variant of the gift product.
    async fn fetch_gift_variant(
        &self,
        product: ProductId,
    ) -> Result<VariantId, CartsRepositoryError>;

    /// Replace the cart's entire line item collection.
    async fn replace_line_items(
        &self,
        cart: CartId,
        line_items: Vec<LineItem>,
    ) -> Result<(), CartsRepositoryError>;
}

impl From<DraftOrderPayload> for Cart {
    fn from(order: DraftOrderPayload) -> Self {
        Self {
            id: CartId::new(order.id),
            token: order.cart_token.map(CartToken::new),
            line_items: order.line_items.into_iter().map(LineItem::from).collect(),
            subtotal: order
                .subtotal_price
                .as_deref()
                .and_then(|subtotal| money::parse_minor_units(subtotal).ok()),
        }
    }
}

impl From<LineItemPayload> for LineItem {
    fn from(item: LineItemPayload) -> Self {
        Self {
            title: item.title,
            product_id: item.product_id.map(ProductId::new),
            variant_id: item.variant_id.map(VariantId::new),
            quantity: item.quantity,
            price: item.price,
            passthrough: item.rest,
        }
    }
}

impl From<LineItem> for LineItemPayload {
    fn from(item: LineItem) -> Self {
        Self {
            title: item.title,
            product_id: item.product_id.map(ProductId::into_inner),
            variant_id: item.variant_id.map(VariantId::into_inner),
            quantity: item.quantity,
            price: item.price,
            rest: item.passthrough,
        }
    }
}
