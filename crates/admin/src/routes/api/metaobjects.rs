//! Generic metaobject CRUD (statuses, registrations, logs).

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use freshcounter_core::normalize_gid;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireStaff,
    shopify::{Metaobject, MetaobjectConnection, MetaobjectInput},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 250;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/metaobjects/{kind}", get(list).post(create))
        .route(
            "/api/metaobjects/{kind}/{id}",
            get(show).put(update).delete(remove),
        )
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub first: Option<i64>,
    pub after: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted_id: String,
}

fn metaobject_id(raw: &str) -> Result<String, AppError> {
    normalize_gid("Metaobject", raw).map_err(AppError::from)
}

/// Reject a record fetched under the wrong type in the path.
fn ensure_kind(metaobject: Metaobject, kind: &str) -> Result<Metaobject, AppError> {
    if metaobject.kind == kind {
        Ok(metaobject)
    } else {
        Err(AppError::NotFound(format!("{kind} {}", metaobject.id)))
    }
}

#[instrument(skip(_actor, state, params))]
pub async fn list(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<ListQuery>,
) -> Result<Json<MetaobjectConnection>, AppError> {
    let first = params
        .first
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = state
        .shopify()
        .get_metaobjects(&kind, first, params.after)
        .await?;
    Ok(Json(page))
}

#[instrument(skip(_actor, state))]
pub async fn show(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Metaobject>, AppError> {
    let id = metaobject_id(&id)?;
    let metaobject = state
        .shopify()
        .get_metaobject(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{kind} {id}")))?;
    Ok(Json(ensure_kind(metaobject, &kind)?))
}

#[instrument(skip(_actor, state, body))]
pub async fn create(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<MetaobjectInput>,
) -> Result<(StatusCode, Json<Metaobject>), AppError> {
    let metaobject = state.shopify().create_metaobject(&kind, &body).await?;
    Ok((StatusCode::CREATED, Json(metaobject)))
}

#[instrument(skip(_actor, state, body))]
pub async fn update(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<MetaobjectInput>,
) -> Result<Json<Metaobject>, AppError> {
    let id = metaobject_id(&id)?;
    let metaobject = state.shopify().update_metaobject(&id, &body).await?;
    Ok(Json(ensure_kind(metaobject, &kind)?))
}

#[instrument(skip(_actor, state))]
pub async fn remove(
    RequireStaff(_actor): RequireStaff,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id = metaobject_id(&id)?;
    let deleted_id = state.shopify().delete_metaobject(&id).await?;
    tracing::info!(kind = %kind, deleted_id = %deleted_id, "Metaobject deleted");
    Ok(Json(DeletedResponse { deleted_id }))
}
