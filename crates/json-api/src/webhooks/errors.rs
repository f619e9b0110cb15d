//! Errors

use salvo::http::StatusError;
use tracing::error;

use freebie_app::domain::webhooks::WebhooksServiceError;

pub(crate) fn into_status_error(error: WebhooksServiceError) -> StatusError {
    match error {
        WebhooksServiceError::MissingCallbackUrl => {
            error!("webhook registration requested without WEBHOOK_CALLBACK_URL");

            StatusError::service_unavailable().brief("Webhook callback URL is not configured")
        }
        WebhooksServiceError::InvalidCallbackUrl(url) => {
            error!("webhook callback URL cannot carry a path: {url}");

            StatusError::internal_server_error().brief("Error setting up webhook")
        }
        WebhooksServiceError::Upstream(source) => {
            error!("failed to register webhook: {source}");

            StatusError::internal_server_error().brief("Error setting up webhook")
        }
    }
}
