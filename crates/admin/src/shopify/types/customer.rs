//! Customer domain types for staff search and the POS portal.

use serde::{Deserialize, Serialize};

/// Metafield key of a customer's order points allowance.
pub const POINTS_ALLOWANCE_METAFIELD_KEY: &str = "order_points_allowance";

/// A customer in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub number_of_orders: u64,
    /// Points the customer may spend per order, when limited.
    pub points_allowance: Option<u64>,
}

/// A Storefront API customer access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAccessToken {
    pub access_token: String,
    pub expires_at: String,
}

/// The signed-in portal customer, kept in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalCustomer {
    pub customer_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub token: CustomerAccessToken,
}
