//! Order domain types for custom status tracking and POS checkout.

use freshcounter_core::StatusLogEntry;
use serde::{Deserialize, Serialize};

/// Metafield key of the current custom status.
pub const STATUS_METAFIELD_KEY: &str = "custom_order_status";

/// Metafield key of the JSON status log.
pub const STATUS_LOG_METAFIELD_KEY: &str = "order_status_log";

/// An order's custom status as stored on Shopify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusRecord {
    pub order_id: String,
    /// Display name, e.g. `#1001`.
    pub order_name: String,
    pub tags: Vec<String>,
    /// Current status, empty when none was ever set.
    pub current_status: String,
    pub log: Vec<StatusLogEntry>,
}

/// Everything written back in a single `orderUpdate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusWrite {
    pub order_id: String,
    pub status: String,
    pub log: Vec<StatusLogEntry>,
    pub tags: Vec<String>,
}

/// One line of a POS draft order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftOrderLine {
    pub variant_id: String,
    pub quantity: u32,
}

/// Input for the draft order created at POS checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftOrderInput {
    pub customer_id: String,
    pub lines: Vec<DraftOrderLine>,
    pub tags: Vec<String>,
    pub note: Option<String>,
}

/// A created draft order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftOrder {
    pub id: String,
    pub name: String,
}
