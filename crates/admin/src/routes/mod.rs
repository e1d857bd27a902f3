//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Staff API (bearer token)
//! POST /api/variants/preview                - Regenerate variants for edited options
//! POST /api/products                        - Create a product with options
//! GET  /api/products/{id}/editor            - Load options and variants
//! PUT  /api/products/{id}/options           - Save options and variants
//! GET  /api/orders/{id}/status              - Current status and log
//! POST /api/orders/{id}/status              - Change status
//! GET  /api/orders/{id}/steps               - Status progress steps
//! GET  /api/customers?query=&seq=           - Customer search
//! GET  /api/metaobjects/{type}              - List metaobjects
//! POST /api/metaobjects/{type}              - Create metaobject
//! GET  /api/metaobjects/{type}/{id}         - Get metaobject
//! PUT  /api/metaobjects/{type}/{id}         - Update metaobject
//! DELETE /api/metaobjects/{type}/{id}       - Delete metaobject
//! POST /api/inventory/adjust                - Adjust inventory with a log entry
//! POST /api/files                           - Upload a file (multipart)
//!
//! # POS portal (session cookie)
//! POST /pos/login                           - Sign in
//! POST /pos/logout                          - Sign out
//! GET  /pos/cart                            - Current cart
//! POST /pos/cart/lines                      - Add one unit of a variant
//! PUT  /pos/cart/lines/{variant_id}         - Set a line's quantity
//! DELETE /pos/cart/lines/{variant_id}       - Remove a line
//! POST /pos/checkout                        - Place the cart as a draft order
//! ```

pub mod api;
pub mod portal;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the application router (without state or outer layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(api::router())
        .merge(portal::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not call Shopify.
pub async fn health() -> &'static str {
    "ok"
}
