//! Integration tests for FreshCounter.
//!
//! Tests drive the full admin router in-process with
//! `tower::ServiceExt::oneshot`. They cover everything that is decided
//! before a request reaches Shopify: authentication, id normalization,
//! validation and the pure endpoints.
//!
//! ```bash
//! cargo test -p freshcounter-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use freshcounter_admin::{
    build_router,
    config::{AdminConfig, PosConfig, ShopifyAdminConfig, ShopifyStorefrontConfig},
    state::AppState,
};
use secrecy::SecretString;
use tower::ServiceExt;

/// Staff token accepted by [`test_app`].
pub const TEST_API_TOKEN: &str = "fc_test_9kQ2mXv7LpR4tZ8w";

/// Configuration pointing at a store that is never contacted.
#[must_use]
pub fn test_config() -> AdminConfig {
    let shopify = ShopifyAdminConfig {
        store: "fresh-counter-test.myshopify.com".to_string(),
        api_version: "2026-01".to_string(),
        access_token: SecretString::from("shpat_test_token"),
    };
    let storefront = ShopifyStorefrontConfig {
        store: shopify.store.clone(),
        api_version: shopify.api_version.clone(),
        access_token: SecretString::from("storefront_test_token"),
    };

    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        api_token: SecretString::from(TEST_API_TOKEN),
        portal_session_secret: SecretString::from(
            "k3Jd9Qm2Xv7Lp4Rt8Zw1Nb6Hc5Fy0Ga3Ue9Io2Pk7Sl4Dm8Vn1Bx6Cz5Qw0Er3Ty",
        ),
        shopify,
        storefront,
        pos: PosConfig {
            initial_status: "Received".to_string(),
            inventory_location_id: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// The full application router over [`test_config`].
///
/// # Panics
///
/// Panics if the router cannot be built.
#[must_use]
pub fn test_app() -> Router {
    build_router(AppState::new(test_config())).expect("router builds with test config")
}

/// Send one request through a fresh router.
///
/// # Panics
///
/// Panics if the router fails to produce a response.
pub async fn send(request: Request<Body>) -> Response<Body> {
    test_app()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not valid JSON.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body can be read");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// A staff request with the test bearer token.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn staff_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TEST_API_TOKEN}"))
        .header("x-staff-first-name", "Ana")
        .header("x-staff-last-name", "Ruiz");

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request")
}
