//! Shopify API clients (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module holds the Shopify Admin API access token.** The Admin API
//! has full access to products, orders, customers, metaobjects, inventory
//! and files.
//!
//! # Architecture
//!
//! - Operations are declared in `admin::queries` as types implementing
//!   `graphql_client::GraphQLQuery`
//! - Requests go straight to Shopify on every call: there is no local cache,
//!   Shopify is the only source of truth
//! - Nothing is retried; every error is returned to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use freshcounter_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify);
//!
//! let editor = client.get_product_editor("gid://shopify/Product/123").await?;
//! let record = client.get_order_status("gid://shopify/Order/456").await?;
//! ```

mod admin;
mod storefront;
pub mod types;

pub use admin::AdminClient;
pub use storefront::StorefrontClient;
pub use types::*;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify APIs.
///
/// Mirrors the three failure layers of a GraphQL call: transport
/// (`Http`, `Status`), request-level `errors` (`GraphQL`) and mutation-level
/// `userErrors` (`UserErrors`).
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Mutation rejected the input.
    #[error("{}", format_user_errors(.0))]
    UserErrors(Vec<UserError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A stored order status log that cannot be read.
    #[error("Unreadable status log on {order_id}: {source}")]
    CorruptStatusLog {
        order_id: String,
        source: serde_json::Error,
    },

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AdminShopifyError {
    /// A GraphQL error for a response that carried no usable payload.
    pub(crate) fn missing(what: &str) -> Self {
        Self::GraphQL(vec![GraphQLError {
            message: format!("No {what} returned"),
            locations: vec![],
            path: vec![],
        }])
    }

    /// Field/message pairs to show next to the form.
    #[must_use]
    pub fn user_errors(&self) -> &[UserError] {
        match self {
            Self::UserErrors(errors) => errors,
            _ => &[],
        }
    }
}

/// A GraphQL error returned by Shopify.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

/// A validation failure reported in a mutation's `userErrors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserError {
    /// Dotted input path, empty when the error is not tied to a field.
    pub field: String,
    pub message: String,
}

impl UserError {
    pub(crate) fn from_parts(field: Option<Vec<String>>, message: String) -> Self {
        Self {
            field: field.map(|f| f.join(".")).unwrap_or_default(),
            message,
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| {
            if e.field.is_empty() {
                e.message.clone()
            } else {
                format!("{}: {}", e.field, e.message)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convert graphql_client errors into ours.
pub(crate) fn convert_graphql_errors(errors: Vec<graphql_client::Error>) -> Vec<GraphQLError> {
    errors
        .into_iter()
        .map(|e| GraphQLError {
            message: e.message,
            locations: e.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: e.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_shopify_error_display() {
        let err = AdminShopifyError::NotFound("order-123".to_string());
        assert_eq!(err.to_string(), "Not found: order-123");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = AdminShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_user_errors_formatting() {
        let err = AdminShopifyError::UserErrors(vec![
            UserError::from_parts(
                Some(vec!["variants".to_string(), "0".to_string(), "price".to_string()]),
                "Price can't be negative".to_string(),
            ),
            UserError::from_parts(None, "Product is locked".to_string()),
        ]);
        assert_eq!(
            err.to_string(),
            "variants.0.price: Price can't be negative; Product is locked"
        );
        assert_eq!(err.user_errors().len(), 2);
    }

    #[test]
    fn test_missing_payload() {
        let err = AdminShopifyError::missing("product");
        assert_eq!(err.to_string(), "GraphQL errors: No product returned");
        assert!(err.user_errors().is_empty());
    }

    #[test]
    fn test_rate_limited_error() {
        let err = AdminShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
