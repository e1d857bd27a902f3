//! Session-related types for the POS portal.
//!
//! The session is the only place a portal customer's state lives between
//! requests: who they are (with their Storefront access token) and their
//! in-progress cart.

use serde::{Deserialize, Serialize};

use crate::shopify::{CustomerAccessToken, PortalCustomer};

/// Session-stored customer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Shopify customer GID.
    pub id: String,
    pub email: Option<String>,
    /// Display name for the portal header.
    pub name: String,
    /// Storefront token, revoked on logout.
    pub token: CustomerAccessToken,
}

impl From<PortalCustomer> for CurrentCustomer {
    fn from(customer: PortalCustomer) -> Self {
        let name = [customer.first_name.as_deref(), customer.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id: customer.customer_id,
            name: if name.is_empty() {
                customer.email.clone().unwrap_or_default()
            } else {
                name
            },
            email: customer.email,
            token: customer.token,
        }
    }
}

/// Session keys for portal data.
pub mod keys {
    /// Key for the signed-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the in-progress cart.
    pub const CART: &str = "cart";
}
