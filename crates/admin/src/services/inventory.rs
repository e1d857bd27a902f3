//! Inventory adjustments with an audit trail.
//!
//! Every adjustment is followed by an `inventory_log` metaobject recording
//! who changed what. The two writes are not atomic: if the log fails the
//! adjustment has already happened, and the error says so.

use chrono::{DateTime, Utc};
use freshcounter_core::Actor;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::shopify::{
    AdminClient, AdminShopifyError, INVENTORY_LOG_TYPE, InventoryAdjustment, Metaobject,
    MetaobjectFieldInput, MetaobjectInput,
};

/// Shopify adjustment reason used when none is given.
pub const DEFAULT_REASON: &str = "correction";

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("An inventory location is required")]
    MissingLocation,

    #[error("Adjustment must change the quantity")]
    ZeroDelta,

    #[error("Inventory adjustment failed: {0}")]
    Adjust(#[source] AdminShopifyError),

    #[error("Inventory was adjusted ({adjustment_group_id}) but the log entry failed: {source}")]
    Log {
        adjustment_group_id: String,
        #[source]
        source: AdminShopifyError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustInventoryRequest {
    pub inventory_item_id: String,
    /// Falls back to the configured POS location.
    #[serde(default)]
    pub location_id: Option<String>,
    pub delta: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdjustReport {
    pub adjustment_group_id: String,
    pub log: Metaobject,
}

/// Fields of the `inventory_log` entry for an adjustment.
#[must_use]
pub fn log_entry(
    adjustment: &InventoryAdjustment,
    adjustment_group_id: &str,
    note: Option<&str>,
    actor: &Actor,
    now: DateTime<Utc>,
) -> MetaobjectInput {
    let mut fields = vec![
        MetaobjectFieldInput::new("inventory_item", &adjustment.inventory_item_id),
        MetaobjectFieldInput::new("location", &adjustment.location_id),
        MetaobjectFieldInput::new("delta", adjustment.delta.to_string()),
        MetaobjectFieldInput::new("reason", &adjustment.reason),
        MetaobjectFieldInput::new("adjustment_group", adjustment_group_id),
        MetaobjectFieldInput::new("user_name", actor.display_name()),
        MetaobjectFieldInput::new("date", now.format("%Y-%m-%d").to_string()),
        MetaobjectFieldInput::new("time", now.format("%H:%M:%S").to_string()),
    ];
    if let Some(note) = note.map(str::trim).filter(|n| !n.is_empty()) {
        fields.push(MetaobjectFieldInput::new("note", note));
    }

    MetaobjectInput {
        handle: None,
        fields,
    }
}

#[derive(Clone)]
pub struct InventoryService {
    shopify: AdminClient,
    default_location_id: Option<String>,
}

impl InventoryService {
    #[must_use]
    pub const fn new(shopify: AdminClient, default_location_id: Option<String>) -> Self {
        Self {
            shopify,
            default_location_id,
        }
    }

    fn adjustment(&self, request: &AdjustInventoryRequest) -> Result<InventoryAdjustment, InventoryError> {
        if request.delta == 0 {
            return Err(InventoryError::ZeroDelta);
        }
        let location_id = request
            .location_id
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| self.default_location_id.clone())
            .ok_or(InventoryError::MissingLocation)?;

        Ok(InventoryAdjustment {
            inventory_item_id: request.inventory_item_id.clone(),
            location_id,
            delta: request.delta,
            reason: request
                .reason
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REASON.to_string()),
        })
    }

    /// Adjust available quantity and record an `inventory_log` entry.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is sent, `Adjust` if the
    /// adjustment fails, or `Log` if only the log entry failed.
    #[instrument(skip(self, request, actor), fields(inventory_item_id = %request.inventory_item_id, delta = request.delta))]
    pub async fn adjust_with_log(
        &self,
        request: &AdjustInventoryRequest,
        actor: &Actor,
    ) -> Result<AdjustReport, InventoryError> {
        let adjustment = self.adjustment(request)?;

        let adjustment_group_id = self
            .shopify
            .adjust_inventory(&adjustment)
            .await
            .map_err(InventoryError::Adjust)?;

        let entry = log_entry(
            &adjustment,
            &adjustment_group_id,
            request.note.as_deref(),
            actor,
            Utc::now(),
        );

        match self.shopify.create_metaobject(INVENTORY_LOG_TYPE, &entry).await {
            Ok(log) => Ok(AdjustReport {
                adjustment_group_id,
                log,
            }),
            Err(source) => {
                tracing::error!(
                    adjustment_group_id = %adjustment_group_id,
                    error = %source,
                    "Inventory adjusted without a log entry"
                );
                Err(InventoryError::Log {
                    adjustment_group_id,
                    source,
                })
            }
        }
    }
}
