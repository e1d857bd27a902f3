//! Shopify Admin API GraphQL client.
//!
//! Authenticates with the custom app's Admin API access token. Operation
//! methods are split by area (`products`, `orders`, `customers`,
//! `metaobjects`, `inventory`, `media`); they all funnel through
//! [`AdminClient::execute`].

use std::sync::Arc;

use graphql_client::GraphQLQuery;
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, UserError, convert_graphql_errors};

/// Map a payload's generated `userErrors` list into `(field, message)` pairs.
macro_rules! user_errors {
    ($errors:expr) => {
        $errors.into_iter().map(|e| (e.field, e.message))
    };
}

mod customers;
mod inventory;
mod media;
mod metaobjects;
mod orders;
mod products;
pub mod queries;

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Security
///
/// The access token grants write access to the whole store. Never hand this
/// client to customer-facing code paths without an authorization check.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    endpoint: String,
    access_token: SecretString,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                store: config.store.clone(),
                endpoint,
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    /// Execute a GraphQL operation against the Admin API.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` on 429, `Unauthorized` on 401, `Status` on any
    /// other non-success status, `GraphQL` when the response carries errors
    /// or no data, and `Parse` when the body is not the expected shape.
    #[instrument(skip(self, variables), fields(store = %self.inner.store))]
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid Admin API access token".to_string(),
            ));
        }

        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Shopify Admin API returned non-success status"
            );
            return Err(AdminShopifyError::Status {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        let graphql_response: graphql_client::Response<Q::ResponseData> =
            match serde_json::from_str(&text) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        body = %text.chars().take(500).collect::<String>(),
                        "Failed to parse Shopify GraphQL response"
                    );
                    return Err(AdminShopifyError::Parse(e));
                }
            };

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            return Err(AdminShopifyError::GraphQL(convert_graphql_errors(errors)));
        }

        graphql_response
            .data
            .ok_or_else(|| AdminShopifyError::missing("data"))
    }
}

/// Fail with `UserErrors` when a mutation payload rejected its input.
///
/// Every payload has its own generated `userErrors` type, so callers pass
/// `(field, message)` pairs.
fn check_user_errors(
    errors: impl IntoIterator<Item = (Option<Vec<String>>, String)>,
) -> Result<(), AdminShopifyError> {
    let errors: Vec<UserError> = errors
        .into_iter()
        .map(|(field, message)| UserError::from_parts(field, message))
        .collect();
    if errors.is_empty() {
        return Ok(());
    }
    Err(AdminShopifyError::UserErrors(errors))
}
