//! POS portal checkout.

use freshcounter_core::{Cart, CartError, CheckoutSummary, fcos_tag};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::shopify::{AdminClient, AdminShopifyError, DraftOrder, DraftOrderInput, DraftOrderLine};

/// Tag marking orders placed through the portal.
pub const POS_ORDER_TAG: &str = "pos-portal";

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub draft_order: DraftOrder,
    pub summary: CheckoutSummary,
}

/// The draft order a gated cart turns into.
#[must_use]
pub fn draft_order_input(
    cart: &Cart,
    customer_id: &str,
    initial_status: &str,
    summary: &CheckoutSummary,
) -> DraftOrderInput {
    DraftOrderInput {
        customer_id: customer_id.to_string(),
        lines: cart
            .lines
            .iter()
            .map(|l| DraftOrderLine {
                variant_id: l.variant_id.clone(),
                quantity: l.quantity,
            })
            .collect(),
        tags: vec![POS_ORDER_TAG.to_string(), fcos_tag(initial_status)],
        note: Some(format!(
            "Items: {}, points: {}, weight: {} g",
            summary.total_quantity, summary.total_order_points, summary.total_weight_grams
        )),
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    shopify: AdminClient,
    initial_status: String,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(shopify: AdminClient, initial_status: String) -> Self {
        Self {
            shopify,
            initial_status,
        }
    }

    /// Gate the cart against the customer's points allowance and place it
    /// as a draft order.
    ///
    /// # Errors
    ///
    /// Returns `Cart` if the cart is empty or over the allowance (nothing is
    /// sent), or `Shopify` if a call fails.
    #[instrument(skip(self, cart), fields(cart_id = %cart.id, customer_id = %customer_id))]
    pub async fn submit_cart(
        &self,
        cart: &Cart,
        customer_id: &str,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if cart.is_empty() {
            return Err(CartError::Empty.into());
        }

        let allowance = self
            .shopify
            .get_customer(customer_id)
            .await?
            .and_then(|c| c.points_allowance);

        let summary = cart.checkout_summary(allowance)?;
        let input = draft_order_input(cart, customer_id, &self.initial_status, &summary);
        let draft_order = self.shopify.create_draft_order(&input).await?;

        tracing::info!(
            draft_order = %draft_order.name,
            points = summary.total_order_points,
            "Portal checkout placed"
        );

        Ok(CheckoutReceipt {
            draft_order,
            summary,
        })
    }
}
