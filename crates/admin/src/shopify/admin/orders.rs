//! Order status and draft order operations for the Admin API.

use freshcounter_core::{StatusLogEntry, status_from_tags};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, check_user_errors,
    queries::{DraftOrderCreate, GetOrderStatus, OrderUpdate, get_order_status},
};
use crate::shopify::types::{
    DraftOrder, DraftOrderInput, METAFIELD_NAMESPACE, OrderStatusRecord, OrderStatusWrite,
    STATUS_LOG_METAFIELD_KEY, STATUS_METAFIELD_KEY,
};

impl AdminClient {
    /// Load an order's status, status log and tags.
    ///
    /// Returns `None` if the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order_status(
        &self,
        id: &str,
    ) -> Result<Option<OrderStatusRecord>, AdminShopifyError> {
        let response = self
            .execute::<GetOrderStatus>(get_order_status::Variables { id: id.to_string() })
            .await?;

        response.order.map(convert_order_status).transpose()
    }

    /// Write status, log and tags in a single `orderUpdate`.
    ///
    /// Returns the tags Shopify stored.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the update and `Parse` if the
    /// log cannot be serialized.
    #[instrument(skip(self, write), fields(order_id = %write.order_id, status = %write.status))]
    pub async fn write_order_status(
        &self,
        write: &OrderStatusWrite,
    ) -> Result<Vec<String>, AdminShopifyError> {
        use super::queries::order_update::{MetafieldInput, OrderInput, Variables};

        let log_json = serde_json::to_string(&write.log)?;

        let variables = Variables {
            input: OrderInput {
                id: write.order_id.clone(),
                tags: Some(write.tags.clone()),
                metafields: Some(vec![
                    MetafieldInput {
                        namespace: Some(METAFIELD_NAMESPACE.to_string()),
                        key: Some(STATUS_METAFIELD_KEY.to_string()),
                        type_: Some("single_line_text_field".to_string()),
                        value: Some(write.status.clone()),
                    },
                    MetafieldInput {
                        namespace: Some(METAFIELD_NAMESPACE.to_string()),
                        key: Some(STATUS_LOG_METAFIELD_KEY.to_string()),
                        type_: Some("json".to_string()),
                        value: Some(log_json),
                    },
                ]),
            },
        };

        let payload = self
            .execute::<OrderUpdate>(variables)
            .await?
            .order_update
            .ok_or_else(|| AdminShopifyError::missing("orderUpdate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        Ok(payload.order.map(|o| o.tags).unwrap_or_default())
    }

    /// Create a draft order for a customer.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the draft.
    #[instrument(skip(self, input), fields(customer_id = %input.customer_id, lines = input.lines.len()))]
    pub async fn create_draft_order(
        &self,
        input: &DraftOrderInput,
    ) -> Result<DraftOrder, AdminShopifyError> {
        use super::queries::draft_order_create::{
            DraftOrderInput as DraftOrderWireInput, DraftOrderLineItemInput, Variables,
        };

        let variables = Variables {
            input: DraftOrderWireInput {
                customer_id: Some(input.customer_id.clone()),
                line_items: Some(
                    input
                        .lines
                        .iter()
                        .map(|l| DraftOrderLineItemInput {
                            variant_id: Some(l.variant_id.clone()),
                            quantity: i64::from(l.quantity),
                        })
                        .collect(),
                ),
                tags: Some(input.tags.clone()),
                note: input.note.clone(),
            },
        };

        let payload = self
            .execute::<DraftOrderCreate>(variables)
            .await?
            .draft_order_create
            .ok_or_else(|| AdminShopifyError::missing("draftOrderCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .draft_order
            .map(|d| DraftOrder {
                id: d.id,
                name: d.name,
            })
            .ok_or_else(|| AdminShopifyError::missing("draft order"))
    }
}

/// Parse the stored status log. A missing log reads as empty; a log that is
/// present but unreadable is an error, since writing over it loses history.
fn parse_status_log(
    order_id: &str,
    raw: Option<&str>,
) -> Result<Vec<StatusLogEntry>, AdminShopifyError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    serde_json::from_str(raw).map_err(|source| {
        tracing::error!(order_id = %order_id, error = %source, "Stored order status log is unreadable");
        AdminShopifyError::CorruptStatusLog {
            order_id: order_id.to_string(),
            source,
        }
    })
}

fn convert_order_status(
    order: get_order_status::GetOrderStatusOrder,
) -> Result<OrderStatusRecord, AdminShopifyError> {
    let log = parse_status_log(&order.id, order.status_log.as_ref().map(|m| m.value.as_str()))?;
    let current_status = order
        .custom_status
        .map(|m| m.value)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| status_from_tags(&order.tags).map(String::from))
        .unwrap_or_default();

    Ok(OrderStatusRecord {
        order_id: order.id,
        order_name: order.name,
        tags: order.tags,
        current_status,
        log,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn order(
        status: Option<&str>,
        log: Option<&str>,
        tags: &[&str],
    ) -> get_order_status::GetOrderStatusOrder {
        serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Order/1",
            "name": "#1001",
            "tags": tags,
            "customStatus": status.map(|s| serde_json::json!({"value": s})),
            "statusLog": log.map(|l| serde_json::json!({"value": l})),
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_order_status_reads_log() {
        let log = r##"[{"orderNo":"#1001","date":"2026-01-02","time":"10:00:00","fromStatus":"Received","toStatus":"Packed","userName":"Ana Ruiz","storeName":"fresh-counter"}]"##;
        let record =
            convert_order_status(order(Some("Packed"), Some(log), &["fcos:Packed"])).unwrap();

        assert_eq!(record.current_status, "Packed");
        assert_eq!(record.order_name, "#1001");
        assert_eq!(record.log.len(), 1);
        assert_eq!(record.log[0].to_status, "Packed");
    }

    #[test]
    fn test_status_falls_back_to_tag() {
        let record = convert_order_status(order(None, None, &["vip", "fcos:Received"])).unwrap();
        assert_eq!(record.current_status, "Received");
        assert!(record.log.is_empty());
    }

    #[test]
    fn test_malformed_log_is_an_error() {
        let err = convert_order_status(order(Some("Packed"), Some("{not json"), &[])).unwrap_err();
        assert!(matches!(
            err,
            AdminShopifyError::CorruptStatusLog { ref order_id, .. } if order_id == "gid://shopify/Order/1"
        ));
    }

    #[test]
    fn test_blank_log_reads_as_empty() {
        let record = convert_order_status(order(Some("Packed"), Some("  "), &[])).unwrap();
        assert!(record.log.is_empty());
    }

    #[test]
    fn test_entry_missing_fields_keeps_history() {
        let log = r##"[{"orderNo":"#1001","date":"2026-01-01","time":"09:00:00","fromStatus":"","toStatus":"Received","userName":"Ana Ruiz"},{"orderNo":"#1001","date":"2026-01-02","time":"10:00:00","fromStatus":"Received","toStatus":"Packed","userName":"Ana Ruiz","storeName":"fresh-counter"}]"##;
        let record = convert_order_status(order(Some("Packed"), Some(log), &[])).unwrap();

        assert_eq!(record.log.len(), 2);
        assert_eq!(record.log[0].to_status, "Received");
        assert_eq!(record.log[0].store_name, "");
    }

    #[test]
    fn test_no_status_anywhere() {
        let record = convert_order_status(order(None, None, &[])).unwrap();
        assert_eq!(record.current_status, "");
    }
}
