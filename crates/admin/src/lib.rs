//! FreshCounter admin library.
//!
//! Staff JSON API and customer POS portal in front of the Shopify Admin
//! API, exposed as a library so the router can be tested in-process.
//!
//! # Security
//!
//! This crate holds HIGH PRIVILEGE access to the Shopify Admin API
//! (products, orders, customers, inventory, files). Staff routes require
//! the shared bearer token; portal routes require a signed session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use config::ConfigError;
use state::AppState;

/// Build the full application: routes, sessions, tracing and Sentry layers.
///
/// # Errors
///
/// Returns `ConfigError` if the portal session key cannot be derived.
pub fn build_router(state: AppState) -> Result<Router, ConfigError> {
    let session_layer = middleware::create_session_layer(state.config())?;

    Ok(routes::routes()
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction()))
}
