//! App Router

use std::sync::Arc;

use salvo::{
    Router, affix_state::inject, catch_panic::CatchPanic, trailing_slash::remove_slash,
};

use crate::{
    carts, healthcheck,
    observability::{metrics_handler, request_logging},
    state::State,
    status, webhooks,
};

pub(crate) fn app_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("status").get(status::handler))
        .push(Router::with_path("check-cart").post(carts::handlers::check::handler))
        .push(
            Router::with_path("webhook-handler").post(webhooks::handlers::notification::handler),
        )
        .push(Router::with_path("setup-webhook").post(webhooks::handlers::register::handler))
}

#[cfg(test)]
mod tests {
    use salvo::{
        Service,
        http::StatusCode,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::strict_app_context;

    use super::*;

    fn service() -> Service {
        Service::new(app_router(State::from_app_context(strict_app_context())))
    }

    #[tokio::test]
    async fn status_is_served_with_request_id() -> TestResult {
        let mut res = TestClient::get("http://example.com/status")
            .send(&service())
            .await;

        let body = res.take_string().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.contains("running"), "expected running status, got {body}");
        assert!(
            res.headers().contains_key("x-request-id"),
            "expected request id header"
        );

        Ok(())
    }

    #[tokio::test]
    async fn check_cart_rejects_get() {
        let res = TestClient::get("http://example.com/check-cart")
            .send(&service())
            .await;

        assert_ne!(res.status_code, Some(StatusCode::OK), "GET must not reconcile");
    }
}
