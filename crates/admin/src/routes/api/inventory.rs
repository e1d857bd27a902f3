//! Inventory adjustment handler.

use axum::{Json, Router, extract::State, routing::post};
use freshcounter_core::normalize_gid;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireStaff,
    services::{AdjustInventoryRequest, AdjustReport},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/inventory/adjust", post(adjust))
}

/// Adjust available quantity and record who did it.
#[instrument(skip(state, actor, body), fields(staff = %actor.display_name()))]
pub async fn adjust(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Json(mut body): Json<AdjustInventoryRequest>,
) -> Result<Json<AdjustReport>, AppError> {
    body.inventory_item_id = normalize_gid("InventoryItem", &body.inventory_item_id)?;
    body.location_id = body
        .location_id
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| normalize_gid("Location", l))
        .transpose()?;

    let report = state.inventory().adjust_with_log(&body, &actor).await?;
    Ok(Json(report))
}
