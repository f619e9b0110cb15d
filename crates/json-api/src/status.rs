//! Service Status Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use freebie_app::money::format_minor_units;

use crate::{extensions::*, state::State};

/// Service status response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Always `running`
    pub status: String,

    pub message: String,

    /// Gift threshold in major units, e.g. `110.00`
    pub threshold: String,

    /// Gift threshold in minor units
    pub threshold_minor_units: u64,
}

/// Service status handler
///
/// Reports that the gift service is active and the threshold it applies.
#[endpoint(tags("health"), summary = "Service status")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let threshold = state.policy().threshold;

    Ok(Json(StatusResponse {
        status: "running".to_string(),
        message: "Free gift service is active".to_string(),
        threshold: format_minor_units(threshold),
        threshold_minor_units: threshold,
    }))
}
