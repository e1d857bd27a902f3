//! Customer search for the staff POS.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::AppError, middleware::RequireStaff, shopify::Customer, state::AppState};

const DEFAULT_RESULTS: i64 = 10;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/customers", get(search))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    /// Caller's request counter, echoed back.
    #[serde(default)]
    pub seq: u64,
    pub first: Option<i64>,
}

/// Search results tagged with the request's `seq`.
///
/// Searches are not cancelled server-side; the client drops any response
/// whose `seq` is older than the latest it sent.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub seq: u64,
    pub customers: Vec<Customer>,
}

#[instrument(skip(_actor, state, params), fields(seq = params.seq))]
pub async fn search(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let customers = state
        .shopify()
        .search_customers(&params.query, params.first.unwrap_or(DEFAULT_RESULTS))
        .await?;

    Ok(Json(SearchResponse {
        seq: params.seq,
        customers,
    }))
}
