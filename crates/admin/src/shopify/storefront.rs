//! Shopify Storefront API client for the customer POS portal.
//!
//! Only the customer account operations the portal needs: sign in with
//! email and password, look the customer up by access token, sign out.

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ShopifyStorefrontConfig;

use super::{
    AdminShopifyError, convert_graphql_errors,
    types::{CustomerAccessToken, PortalCustomer},
};

/// ISO 8601 date-time string.
type DateTime = String;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/customer.graphql",
    response_derives = "Debug, Clone"
)]
pub struct CustomerAccessTokenCreate;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/customer.graphql",
    response_derives = "Debug, Clone"
)]
pub struct CustomerAccessTokenDelete;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/customer.graphql",
    response_derives = "Debug, Clone"
)]
pub struct GetPortalCustomer;

/// Shopify Storefront API client.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: SecretString,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.access_token.clone(),
            }),
        }
    }

    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let request_body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                self.inner.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify Storefront API returned non-success status"
            );
            return Err(AdminShopifyError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let response: Response<Q::ResponseData> = serde_json::from_str(&response_text)?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            return Err(AdminShopifyError::GraphQL(convert_graphql_errors(errors)));
        }

        response
            .data
            .ok_or_else(|| AdminShopifyError::missing("data"))
    }

    /// Sign a customer in and load their profile.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when Shopify rejects the credentials.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<PortalCustomer, AdminShopifyError> {
        use customer_access_token_create::{CustomerAccessTokenCreateInput, Variables};

        let variables = Variables {
            input: CustomerAccessTokenCreateInput {
                email: email.to_string(),
                password: password.to_string(),
            },
        };

        let payload = self
            .execute::<CustomerAccessTokenCreate>(variables)
            .await?
            .customer_access_token_create
            .ok_or_else(|| AdminShopifyError::missing("customerAccessTokenCreate payload"))?;

        // Wrong credentials come back as customerUserErrors, not a GraphQL error.
        if let Some(error) = payload.customer_user_errors.into_iter().next() {
            tracing::info!(reason = %error.message, "Portal sign-in rejected");
            return Err(AdminShopifyError::Unauthorized(error.message));
        }

        let token = payload.customer_access_token.ok_or_else(|| {
            AdminShopifyError::Unauthorized("Invalid email or password".to_string())
        })?;
        let token = CustomerAccessToken {
            access_token: token.access_token,
            expires_at: token.expires_at,
        };

        self.customer_for_token(token).await
    }

    /// Load the customer an access token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is expired or revoked.
    #[instrument(skip(self, token))]
    pub async fn customer_for_token(
        &self,
        token: CustomerAccessToken,
    ) -> Result<PortalCustomer, AdminShopifyError> {
        let response = self
            .execute::<GetPortalCustomer>(get_portal_customer::Variables {
                customer_access_token: token.access_token.clone(),
            })
            .await?;

        let customer = response.customer.ok_or_else(|| {
            AdminShopifyError::Unauthorized("Customer session expired".to_string())
        })?;

        Ok(PortalCustomer {
            customer_id: customer.id,
            email: customer.email,
            first_name: customer.first_name,
            last_name: customer.last_name,
            token,
        })
    }

    /// Revoke a customer access token. Revoking an unknown token succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, access_token))]
    pub async fn logout(&self, access_token: &str) -> Result<(), AdminShopifyError> {
        let response = self
            .execute::<CustomerAccessTokenDelete>(customer_access_token_delete::Variables {
                customer_access_token: access_token.to_string(),
            })
            .await?;

        if response
            .customer_access_token_delete
            .and_then(|p| p.deleted_access_token)
            .is_none()
        {
            tracing::debug!("Customer access token was already gone");
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_endpoint() {
        let client = StorefrontClient::new(&ShopifyStorefrontConfig {
            store: "fresh-counter.myshopify.com".to_string(),
            api_version: "2025-07".to_string(),
            access_token: SecretString::from("shpat_storefront"),
        });

        assert_eq!(
            client.inner.endpoint,
            "https://fresh-counter.myshopify.com/api/2025-07/graphql.json"
        );
    }

    #[test]
    fn test_login_variables_shape() {
        let body = CustomerAccessTokenCreate::build_query(customer_access_token_create::Variables {
            input: customer_access_token_create::CustomerAccessTokenCreateInput {
                email: "ana@example.com".to_string(),
                password: "secret".to_string(),
            },
        });

        assert_eq!(body.operation_name, "CustomerAccessTokenCreate");
        let json = serde_json::to_value(&body.variables).unwrap();
        assert_eq!(json["input"]["email"], "ana@example.com");
    }

    #[test]
    fn test_rejected_login_reads_customer_user_errors() {
        let response: customer_access_token_create::ResponseData =
            serde_json::from_value(serde_json::json!({
                "customerAccessTokenCreate": {
                    "customerAccessToken": null,
                    "customerUserErrors": [{"field": ["input"], "message": "Unidentified customer"}]
                }
            }))
            .unwrap();

        let payload = response.customer_access_token_create.unwrap();
        assert!(payload.customer_access_token.is_none());
        assert_eq!(payload.customer_user_errors[0].message, "Unidentified customer");
    }

    #[test]
    fn test_portal_customer_variables_use_graphql_names() {
        let variables = get_portal_customer::Variables {
            customer_access_token: "tok".to_string(),
        };
        let json = serde_json::to_value(&variables).unwrap();
        assert_eq!(json["customerAccessToken"], "tok");
    }
}
