//! Product option editor handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use freshcounter_core::normalize_gid;
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireStaff,
    services::{SaveProductRequest, SaveReport},
    shopify::ProductEditor,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", post(create_with_options))
        .route("/api/products/{id}/editor", get(editor))
        .route("/api/products/{id}/options", put(save_options))
}

/// Load a product's options (with value ids) and variants.
#[instrument(skip(_actor, state))]
pub async fn editor(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductEditor>, AppError> {
    let id = normalize_gid("Product", &id)?;
    state
        .shopify()
        .get_product_editor(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))
}

/// Save edited options and the regenerated variants of an existing product.
#[instrument(skip(state, actor, body), fields(staff = %actor.display_name()))]
pub async fn save_options(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut body): Json<SaveProductRequest>,
) -> Result<Json<SaveReport>, AppError> {
    body.product_id = Some(normalize_gid("Product", &id)?);
    body.new_product = None;

    let report = state.product_editor().save_product_options(body).await?;
    Ok(Json(report))
}

/// Create a product and save its options in one go.
#[instrument(skip(state, actor, body), fields(staff = %actor.display_name()))]
pub async fn create_with_options(
    RequireStaff(actor): RequireStaff,
    State(state): State<AppState>,
    Json(mut body): Json<SaveProductRequest>,
) -> Result<Json<SaveReport>, AppError> {
    if body.new_product.is_none() {
        return Err(AppError::BadRequest("new_product is required".to_string()));
    }
    body.product_id = None;

    let report = state.product_editor().save_product_options(body).await?;
    Ok(Json(report))
}
