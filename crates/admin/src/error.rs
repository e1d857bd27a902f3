//! Unified error handling for admin.
//!
//! Every error renders as JSON:
//!
//! ```json
//! { "error": "...", "details": [{ "field": "...", "message": "..." }] }
//! ```
//!
//! `details` carries Shopify `userErrors` or local validation failures so
//! the client can show them next to the offending field.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use freshcounter_core::{CartError, GidError, OptionError};
use serde::Serialize;
use thiserror::Error;

use crate::services::{
    CheckoutError, InventoryError, OrderStatusError, SaveError, SaveStep,
};
use crate::shopify::{AdminShopifyError, UserError};

/// Application-level error type for the admin service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Product save failed.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// Order status update failed.
    #[error(transparent)]
    OrderStatus(#[from] OrderStatusError),

    /// Inventory adjustment failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Portal checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Cart change rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Options failed validation.
    #[error(transparent)]
    Options(#[from] OptionError),

    /// Malformed Shopify id.
    #[error("Invalid id: {0}")]
    InvalidId(#[from] GidError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Vec<UserError>,
    /// Save steps that were applied before the failure.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub completed_steps: Vec<SaveStep>,
}

fn shopify_status(err: &AdminShopifyError) -> StatusCode {
    match err {
        AdminShopifyError::UserErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AdminShopifyError::NotFound(_) => StatusCode::NOT_FOUND,
        AdminShopifyError::CorruptStatusLog { .. } => StatusCode::CONFLICT,
        AdminShopifyError::RateLimited(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn cart_status(err: &CartError) -> StatusCode {
    match err {
        CartError::LineNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn field_error(field: &str, message: String) -> Vec<UserError> {
    vec![UserError {
        field: field.to_string(),
        message,
    }]
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Shopify(e)
            | Self::Save(SaveError::StepFailed { source: e, .. })
            | Self::OrderStatus(OrderStatusError::Shopify(e))
            | Self::Checkout(CheckoutError::Shopify(e))
            | Self::Inventory(InventoryError::Adjust(e)) => shopify_status(e),
            Self::Save(SaveError::Invalid(_)) | Self::Options(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Cart(e) | Self::Checkout(CheckoutError::Cart(e)) => cart_status(e),
            Self::Inventory(InventoryError::Log { .. }) => StatusCode::BAD_GATEWAY,
            Self::Save(SaveError::MissingProduct)
            | Self::Inventory(InventoryError::MissingLocation | InventoryError::ZeroDelta)
            | Self::InvalidId(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::OrderStatus(OrderStatusError::OrderNotFound(_)) | Self::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Field-level details for the client.
    #[must_use]
    pub fn details(&self) -> Vec<UserError> {
        match self {
            Self::Shopify(e)
            | Self::Save(SaveError::StepFailed { source: e, .. })
            | Self::OrderStatus(OrderStatusError::Shopify(e))
            | Self::Checkout(CheckoutError::Shopify(e))
            | Self::Inventory(InventoryError::Adjust(e) | InventoryError::Log { source: e, .. }) => {
                e.user_errors().to_vec()
            }
            Self::Save(SaveError::Invalid(e)) | Self::Options(e) => {
                field_error(e.field(), e.to_string())
            }
            Self::Cart(e) | Self::Checkout(CheckoutError::Cart(e)) => {
                field_error("cart", e.to_string())
            }
            Self::Inventory(InventoryError::MissingLocation) => {
                field_error("location_id", InventoryError::MissingLocation.to_string())
            }
            Self::Inventory(InventoryError::ZeroDelta) => {
                field_error("delta", InventoryError::ZeroDelta.to_string())
            }
            _ => Vec::new(),
        }
    }

    fn completed_steps(&self) -> Vec<SaveStep> {
        match self {
            Self::Save(SaveError::StepFailed { completed, .. }) => completed.clone(),
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Shopify(e) if e.user_errors().is_empty() => "External service error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorBody {
            error,
            details: self.details(),
            completed_steps: self.completed_steps(),
        };

        (status, Json(body)).into_response()
    }
}

/// Set the Sentry user context from a portal customer or staff member.
pub fn set_sentry_user(id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("order-123".to_string());
        assert_eq!(err.to_string(), "Not found: order-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("test".to_string()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Cart(CartError::Empty).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Shopify(AdminShopifyError::RateLimited(3)).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Inventory(InventoryError::ZeroDelta).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unreadable_status_log_is_conflict() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = AppError::OrderStatus(OrderStatusError::Shopify(
            AdminShopifyError::CorruptStatusLog {
                order_id: "gid://shopify/Order/1".to_string(),
                source,
            },
        ));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_user_errors_render_as_details() {
        let err = AppError::Shopify(AdminShopifyError::UserErrors(vec![UserError {
            field: "variants.0.price".to_string(),
            message: "Price can't be negative".to_string(),
        }]));

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], "variants.0.price");
        assert_eq!(body["details"][0]["message"], "Price can't be negative");
        assert!(body.get("completed_steps").is_none());
    }

    #[tokio::test]
    async fn test_step_failure_lists_completed_steps() {
        let err = AppError::Save(SaveError::StepFailed {
            step: SaveStep::CreateVariants,
            completed: vec![SaveStep::CreateOptions],
            product_id: Some("gid://shopify/Product/1".to_string()),
            source: AdminShopifyError::Status {
                status: 500,
                body: String::new(),
            },
        });

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["completed_steps"][0], "create_options");
    }

    #[tokio::test]
    async fn test_option_error_names_field() {
        let (status, body) = body_json(AppError::Options(OptionError::BlankName)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"][0]["field"], OptionError::BlankName.field());
    }

    #[tokio::test]
    async fn test_internal_error_is_hidden() {
        let (_, body) = body_json(AppError::Internal("db password leaked".to_string())).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
