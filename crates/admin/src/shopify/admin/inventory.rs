//! Inventory adjustment for the Admin API.

use tracing::instrument;

use super::{AdminClient, AdminShopifyError, check_user_errors, queries::InventoryAdjustQuantities};
use crate::shopify::types::InventoryAdjustment;

impl AdminClient {
    /// Adjust available quantity by a delta.
    ///
    /// Returns the id of the adjustment group Shopify recorded.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the adjustment.
    #[instrument(skip(self, adjustment), fields(inventory_item_id = %adjustment.inventory_item_id, location_id = %adjustment.location_id, delta = %adjustment.delta))]
    pub async fn adjust_inventory(
        &self,
        adjustment: &InventoryAdjustment,
    ) -> Result<String, AdminShopifyError> {
        use super::queries::inventory_adjust_quantities::{
            InventoryAdjustQuantitiesInput, InventoryChangeInput, Variables,
        };

        let variables = Variables {
            input: InventoryAdjustQuantitiesInput {
                name: "available".to_string(),
                reason: adjustment.reason.clone(),
                changes: vec![InventoryChangeInput {
                    delta: adjustment.delta,
                    inventory_item_id: adjustment.inventory_item_id.clone(),
                    location_id: adjustment.location_id.clone(),
                }],
            },
        };

        let payload = self
            .execute::<InventoryAdjustQuantities>(variables)
            .await?
            .inventory_adjust_quantities
            .ok_or_else(|| AdminShopifyError::missing("inventoryAdjustQuantities payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .inventory_adjustment_group
            .map(|g| g.id)
            .ok_or_else(|| AdminShopifyError::missing("adjustment group"))
    }
}
