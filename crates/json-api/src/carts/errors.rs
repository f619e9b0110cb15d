//! Errors

use salvo::http::StatusCode;

use freebie_app::domain::gifts::models::ReconciliationOutcome;

/// HTTP status for a reconciliation outcome.
pub(crate) fn outcome_status(outcome: &ReconciliationOutcome) -> StatusCode {
    match outcome {
        ReconciliationOutcome::GiftAdded { .. }
        | ReconciliationOutcome::GiftRemoved { .. }
        | ReconciliationOutcome::NoChange { .. } => StatusCode::OK,
        ReconciliationOutcome::CartNotFound
        | ReconciliationOutcome::GiftProductUnavailable { .. } => StatusCode::NOT_FOUND,
        ReconciliationOutcome::UpstreamError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing message for outcomes that did not reach the target state.
pub(crate) fn outcome_error(outcome: &ReconciliationOutcome) -> Option<&'static str> {
    match outcome {
        ReconciliationOutcome::CartNotFound => Some("Cart not found"),
        ReconciliationOutcome::GiftProductUnavailable { .. } => Some("Free gift product not found"),
        ReconciliationOutcome::UpstreamError { .. } => Some("Error processing cart"),
        ReconciliationOutcome::GiftAdded { .. }
        | ReconciliationOutcome::GiftRemoved { .. }
        | ReconciliationOutcome::NoChange { .. } => None,
    }
}
