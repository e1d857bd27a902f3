//! Custom order status tracking.
//!
//! An order's status lives in three places that must agree: the
//! `custom.custom_order_status` metafield, the `custom.order_status_log`
//! metafield and a single `fcos:<status>` tag. All three are written by one
//! `orderUpdate` call.

use chrono::{DateTime, Utc};
use freshcounter_core::{
    Actor, StatusDefinition, StatusStep, derive_status_steps, is_status_change,
    reconcile_status_log, retag_with_status,
};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::shopify::{
    AdminClient, AdminShopifyError, OrderStatusRecord, OrderStatusWrite, STATUS_DEFINITION_TYPE,
};

#[derive(Debug, Error)]
pub enum OrderStatusError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),
}

/// Result of a status update.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateOutcome {
    /// Whether anything was written.
    pub changed: bool,
    pub record: OrderStatusRecord,
}

/// The write a status change needs, or `None` when it is a no-op.
#[must_use]
pub fn plan_status_change(
    record: &OrderStatusRecord,
    new_status: &str,
    actor: &Actor,
    store: &str,
    now: DateTime<Utc>,
) -> Option<OrderStatusWrite> {
    let new_status = new_status.trim();
    if !is_status_change(new_status, &record.current_status) {
        return None;
    }

    Some(OrderStatusWrite {
        order_id: record.order_id.clone(),
        status: new_status.to_string(),
        log: reconcile_status_log(
            &record.log,
            new_status,
            &record.current_status,
            actor,
            store,
            &record.order_name,
            now,
        ),
        tags: retag_with_status(&record.tags, new_status),
    })
}

#[derive(Clone)]
pub struct OrderStatusService {
    shopify: AdminClient,
    store_name: String,
}

impl OrderStatusService {
    #[must_use]
    pub const fn new(shopify: AdminClient, store_name: String) -> Self {
        Self {
            shopify,
            store_name,
        }
    }

    /// Load an order's status record.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown order.
    pub async fn get(&self, order_id: &str) -> Result<OrderStatusRecord, OrderStatusError> {
        self.shopify
            .get_order_status(order_id)
            .await?
            .ok_or_else(|| OrderStatusError::OrderNotFound(order_id.to_string()))
    }

    /// Move an order to `new_status`, logging who did it.
    ///
    /// Re-submitting the current status writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown order, or the Shopify error
    /// if the load or the write fails.
    #[instrument(skip(self, actor), fields(order_id = %order_id, status = %new_status))]
    pub async fn update_order_status(
        &self,
        order_id: &str,
        new_status: &str,
        actor: &Actor,
    ) -> Result<StatusUpdateOutcome, OrderStatusError> {
        let mut record = self.get(order_id).await?;

        let Some(write) =
            plan_status_change(&record, new_status, actor, &self.store_name, Utc::now())
        else {
            tracing::debug!("Status unchanged, nothing to write");
            return Ok(StatusUpdateOutcome {
                changed: false,
                record,
            });
        };

        let tags = self.shopify.write_order_status(&write).await?;

        tracing::info!(
            from = %record.current_status,
            to = %write.status,
            "Order status changed"
        );

        record.tags = if tags.is_empty() { write.tags } else { tags };
        record.current_status = write.status;
        record.log = write.log;

        Ok(StatusUpdateOutcome {
            changed: true,
            record,
        })
    }

    /// The configured statuses, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the metaobjects cannot be loaded.
    #[instrument(skip(self))]
    pub async fn status_definitions(&self) -> Result<Vec<StatusDefinition>, OrderStatusError> {
        let mut definitions: Vec<StatusDefinition> = self
            .shopify
            .get_all_metaobjects(STATUS_DEFINITION_TYPE)
            .await?
            .iter()
            .filter_map(|m| m.to_status_definition())
            .collect();
        definitions.sort_by_key(|d| d.position);
        Ok(definitions)
    }

    /// Progress steps for an order.
    ///
    /// # Errors
    ///
    /// Returns `OrderNotFound` for an unknown order, or the Shopify error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn status_steps(&self, order_id: &str) -> Result<Vec<StatusStep>, OrderStatusError> {
        let record = self.get(order_id).await?;
        let definitions = self.status_definitions().await?;
        Ok(derive_status_steps(&definitions, &record.log))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record(current_status: &str) -> OrderStatusRecord {
        OrderStatusRecord {
            order_id: "gid://shopify/Order/1".to_string(),
            order_name: "#1001".to_string(),
            tags: vec!["vip".to_string(), format!("fcos:{current_status}")],
            current_status: current_status.to_string(),
            log: vec![],
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 15, 30, 0).unwrap()
    }

    #[test]
    fn test_plan_status_change_writes_everything() {
        let write = plan_status_change(
            &record("Received"),
            "Packed",
            &Actor::new("Ana", "Ruiz"),
            "fresh-counter",
            now(),
        )
        .unwrap();

        assert_eq!(write.status, "Packed");
        assert_eq!(write.tags, vec!["vip", "fcos:Packed"]);
        assert_eq!(write.log.len(), 1);
        assert_eq!(write.log[0].from_status, "Received");
        assert_eq!(write.log[0].order_no, "#1001");
        assert_eq!(write.log[0].date, "2026-03-04");
        assert_eq!(write.log[0].time, "15:30:00");
        assert_eq!(write.log[0].store_name, "fresh-counter");
    }

    #[test]
    fn test_same_status_is_noop() {
        let actor = Actor::new("Ana", "Ruiz");
        assert!(plan_status_change(&record("Packed"), "Packed", &actor, "s", now()).is_none());
        assert!(plan_status_change(&record("Packed"), "  ", &actor, "s", now()).is_none());
    }

    #[test]
    fn test_status_is_trimmed() {
        let write = plan_status_change(
            &record("Received"),
            " Packed ",
            &Actor::new("Ana", "Ruiz"),
            "s",
            now(),
        )
        .unwrap();
        assert_eq!(write.status, "Packed");
        assert_eq!(write.tags.last().unwrap(), "fcos:Packed");
    }

    #[test]
    fn test_change_keeps_entries_with_missing_fields() {
        let stored = r##"[{"orderNo":"#1001","date":"2026-03-01","time":"08:00:00","fromStatus":"","toStatus":"Received","userName":"Ana Ruiz"},{"orderNo":"#1001","date":"2026-03-02","time":"09:00:00","fromStatus":"Received","toStatus":"Packed","storeName":"fresh-counter"}]"##;
        let mut current = record("Packed");
        current.log = serde_json::from_str(stored).unwrap();

        let write = plan_status_change(
            &current,
            "Collected",
            &Actor::new("Ana", "Ruiz"),
            "fresh-counter",
            now(),
        )
        .unwrap();

        assert_eq!(write.log.len(), 3);
        assert_eq!(write.log[..2], current.log[..]);
        assert_eq!(write.log[2].from_status, "Packed");
        assert_eq!(write.log[2].to_status, "Collected");
    }
}
