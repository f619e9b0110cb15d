//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use freebie_app::{
    context::AppContext,
    domain::{
        carts::models::ProductId,
        gifts::{MockGiftsService, models::GiftPolicy},
        webhooks::MockWebhooksService,
    },
};

use crate::state::State;

pub(crate) const TEST_POLICY: GiftPolicy = GiftPolicy {
    threshold: 11_000,
    gift_product_id: ProductId::new(8_001),
};

fn strict_gifts_mock() -> MockGiftsService {
    let mut gifts = MockGiftsService::new();

    gifts.expect_reconcile().never();

    gifts
}

fn strict_webhooks_mock() -> MockWebhooksService {
    let mut webhooks = MockWebhooksService::new();

    webhooks.expect_register_cart_updates().never();

    webhooks
}

fn app_context(gifts: MockGiftsService, webhooks: MockWebhooksService) -> AppContext {
    AppContext {
        gifts: Arc::new(gifts),
        webhooks: Arc::new(webhooks),
        policy: TEST_POLICY,
    }
}

pub(crate) fn strict_app_context() -> AppContext {
    app_context(strict_gifts_mock(), strict_webhooks_mock())
}

pub(crate) fn gifts_service(gifts: MockGiftsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app_context(
                gifts,
                strict_webhooks_mock(),
            ))))
            .push(route),
    )
}

pub(crate) fn webhooks_service(webhooks: MockWebhooksService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app_context(
                strict_gifts_mock(),
                webhooks,
            ))))
            .push(route),
    )
}
