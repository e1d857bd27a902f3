//! Inventory domain types.

use serde::{Deserialize, Serialize};

/// Metaobject type recording inventory adjustments.
pub const INVENTORY_LOG_TYPE: &str = "inventory_log";

/// A delta adjustment of available stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryAdjustment {
    pub inventory_item_id: String,
    pub location_id: String,
    pub delta: i64,
    /// Shopify reason code, e.g. `correction`, `received`, `damaged`.
    pub reason: String,
}
