//! Staff JSON API.
//!
//! Every handler requires `Authorization: Bearer <ADMIN_API_TOKEN>`. Ids in
//! paths may be bare numbers or full `gid://shopify/...` ids.

pub mod customers;
pub mod files;
pub mod inventory;
pub mod metaobjects;
pub mod orders;
pub mod products;
pub mod variants;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(variants::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(customers::router())
        .merge(metaobjects::router())
        .merge(inventory::router())
        .merge(files::router())
}
