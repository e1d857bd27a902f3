//! Metaobject domain types.
//!
//! Metaobjects are Shopify's generic typed records. FreshCounter stores
//! registrations, inventory logs and the configured order statuses in them.

use freshcounter_core::StatusDefinition;
use serde::{Deserialize, Serialize};

use super::common::PageInfo;

/// Metaobject type holding the configured order statuses.
pub const STATUS_DEFINITION_TYPE: &str = "order_status";

/// A key/value field of a metaobject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaobjectField {
    pub key: String,
    pub value: Option<String>,
}

/// A metaobject record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metaobject {
    pub id: String,
    pub handle: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub updated_at: Option<String>,
    pub fields: Vec<MetaobjectField>,
}

impl Metaobject {
    /// The value of field `key`, if set.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value.as_deref())
    }

    /// Read an `order_status` record. Records without a name are skipped.
    #[must_use]
    pub fn to_status_definition(&self) -> Option<StatusDefinition> {
        let name = self.field("name")?.trim();
        if name.is_empty() {
            return None;
        }
        let position = self
            .field("position")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(i32::MAX);
        Some(StatusDefinition {
            name: name.to_string(),
            position,
        })
    }
}

/// A page of metaobjects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaobjectConnection {
    pub metaobjects: Vec<Metaobject>,
    pub page_info: PageInfo,
}

/// A field to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaobjectFieldInput {
    pub key: String,
    pub value: String,
}

impl MetaobjectFieldInput {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Fields (and optionally a handle) for create/update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaobjectInput {
    #[serde(default)]
    pub handle: Option<String>,
    pub fields: Vec<MetaobjectFieldInput>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_object(name: Option<&str>, position: Option<&str>) -> Metaobject {
        let mut fields = Vec::new();
        if let Some(name) = name {
            fields.push(MetaobjectField {
                key: "name".to_string(),
                value: Some(name.to_string()),
            });
        }
        if let Some(position) = position {
            fields.push(MetaobjectField {
                key: "position".to_string(),
                value: Some(position.to_string()),
            });
        }
        Metaobject {
            id: "gid://shopify/Metaobject/1".to_string(),
            handle: "packed".to_string(),
            kind: STATUS_DEFINITION_TYPE.to_string(),
            updated_at: None,
            fields,
        }
    }

    #[test]
    fn test_status_definition_from_fields() {
        let definition = status_object(Some("Packed"), Some("2"))
            .to_status_definition()
            .unwrap();
        assert_eq!(definition.name, "Packed");
        assert_eq!(definition.position, 2);
    }

    #[test]
    fn test_status_definition_without_position_sorts_last() {
        let definition = status_object(Some("Packed"), None)
            .to_status_definition()
            .unwrap();
        assert_eq!(definition.position, i32::MAX);
    }

    #[test]
    fn test_status_definition_requires_name() {
        assert!(status_object(None, Some("1")).to_status_definition().is_none());
        assert!(
            status_object(Some("  "), Some("1"))
                .to_status_definition()
                .is_none()
        );
    }
}
