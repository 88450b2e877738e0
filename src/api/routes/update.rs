//! Update Route
//!
//! POST /_dash-update-component
//!
//! The page reports which input properties changed along with the current
//! value of every input; the response carries the recomputed outputs.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dispatch::{UpdateRequest, UpdateResponse};

/// POST /_dash-update-component
pub async fn update_component(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    if !request.initial && request.changed.is_empty() {
        return Err(ApiError::Validation(
            "request must be initial or name at least one changed property".to_string(),
        ));
    }

    let response = state.dispatcher.dispatch(&request).await?;

    let failed = response.outputs.iter().filter(|o| o.error.is_some()).count();
    if failed > 0 {
        tracing::debug!(failed, "Update finished with output errors");
    }

    Ok(Json(response))
}
