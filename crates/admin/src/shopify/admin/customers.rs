//! Customer lookup for the Admin API.

use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError,
    queries::{GetCustomer, SearchCustomers, get_customer, search_customers},
};
use crate::shopify::types::Customer;

/// Build a [`Customer`] from any generated customer selection.
///
/// Search and lookup select the same fields into distinct generated types.
macro_rules! convert_customer {
    ($customer:expr) => {{
        let customer = $customer;
        Customer {
            id: customer.id,
            display_name: customer.display_name,
            email: customer.email,
            phone: customer.phone,
            number_of_orders: customer.number_of_orders.parse().unwrap_or(0),
            points_allowance: customer
                .points_allowance
                .and_then(|m| m.value.trim().parse().ok()),
        }
    }};
}

/// Largest page the customer search asks for.
const MAX_SEARCH_RESULTS: i64 = 50;

impl AdminClient {
    /// Search customers by name, email or phone.
    ///
    /// An empty query lists the first customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_customers(
        &self,
        query: &str,
        first: i64,
    ) -> Result<Vec<Customer>, AdminShopifyError> {
        let query = query.trim();
        let variables = search_customers::Variables {
            first: first.clamp(1, MAX_SEARCH_RESULTS),
            query: (!query.is_empty()).then(|| query.to_string()),
        };

        let response = self.execute::<SearchCustomers>(variables).await?;

        Ok(response
            .customers
            .nodes
            .into_iter()
            .map(|c| convert_customer!(c))
            .collect())
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(customer_id = %id))]
    pub async fn get_customer(&self, id: &str) -> Result<Option<Customer>, AdminShopifyError> {
        let response = self
            .execute::<GetCustomer>(get_customer::Variables { id: id.to_string() })
            .await?;

        Ok(response.customer.map(|c| convert_customer!(c)))
    }
}
