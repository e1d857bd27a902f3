//! Custom order status handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use freshcounter_core::{StatusStep, normalize_gid};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireStaff,
    services::StatusUpdateOutcome,
    shopify::OrderStatusRecord,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders/{id}/status", get(status).post(update_status))
        .route("/api/orders/{id}/steps", get(steps))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[instrument(skip(_actor, state))]
pub async fn status(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderStatusRecord>, AppError> {
    let id = normalize_gid("Order", &id)?;
    Ok(Json(state.order_status().get(&id).await?))
}

/// Move an order to a new custom status.
///
/// Unchanged statuses return `changed: false` without writing.
#[instrument(skip(state, actor, body), fields(staff = %actor.display_name(), status = %body.status))]
pub async fn update_status(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<StatusUpdateOutcome>, AppError> {
    let id = normalize_gid("Order", &id)?;
    let outcome = state
        .order_status()
        .update_order_status(&id, &body.status, &actor)
        .await?;
    Ok(Json(outcome))
}

#[instrument(skip(_actor, state))]
pub async fn steps(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<StatusStep>>, AppError> {
    let id = normalize_gid("Order", &id)?;
    Ok(Json(state.order_status().status_steps(&id).await?))
}
