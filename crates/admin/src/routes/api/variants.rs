//! Variant preview for the option editor.

use axum::{Json, Router, routing::post};
use freshcounter_core::{ProductOption, Variant, diff_variants, generate_variants};
use serde::{Deserialize, Serialize};

use crate::{middleware::RequireStaff, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/variants/preview", post(preview))
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub options: Vec<ProductOption>,
    /// Variants as loaded from Shopify.
    #[serde(default)]
    pub prior_variants: Vec<Variant>,
    /// Variants as edited so far.
    #[serde(default)]
    pub current_variants: Vec<Variant>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub variants: Vec<Variant>,
    /// Persisted variants the next save would delete.
    pub to_delete: Vec<String>,
}

/// Regenerate the variant grid after an option edit.
///
/// Pure: nothing is sent to Shopify.
pub async fn preview(
    RequireStaff(_actor): RequireStaff,
    Json(body): Json<PreviewRequest>,
) -> Json<PreviewResponse> {
    let variants = generate_variants(&body.options, &body.prior_variants, &body.current_variants);
    let to_delete = diff_variants(&body.prior_variants, &variants).to_delete;
    Json(PreviewResponse {
        variants,
        to_delete,
    })
}
