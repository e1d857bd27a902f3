//! Shopify global IDs.
//!
//! Shopify addresses every record with a URI of the form
//! `gid://shopify/<Resource>/<id>`. Routes and CLI commands accept either the
//! full gid or the bare numeric id; [`normalize_gid`] turns both into the
//! full form before anything is sent to the API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const GID_PREFIX: &str = "gid://shopify/";

/// Resource names used in Shopify global IDs.
pub mod resource {
    pub const PRODUCT: &str = "Product";
    pub const PRODUCT_OPTION: &str = "ProductOption";
    pub const PRODUCT_OPTION_VALUE: &str = "ProductOptionValue";
    pub const PRODUCT_VARIANT: &str = "ProductVariant";
    pub const ORDER: &str = "Order";
    pub const CUSTOMER: &str = "Customer";
    pub const METAOBJECT: &str = "Metaobject";
    pub const LOCATION: &str = "Location";
    pub const INVENTORY_ITEM: &str = "InventoryItem";
}

/// Errors produced when parsing a Shopify global ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GidError {
    #[error("not a Shopify gid: {0}")]
    NotAGid(String),
    #[error("gid is missing its resource type: {0}")]
    MissingResource(String),
    #[error("gid is missing its id: {0}")]
    MissingId(String),
    #[error("expected a {expected} gid, got {actual}")]
    WrongResource { expected: String, actual: String },
}

/// A parsed Shopify global ID.
///
/// The id segment is kept verbatim, including any query suffix Shopify
/// appends (e.g. `?inventory_item_id=...`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShopifyGid {
    resource: String,
    id: String,
}

impl ShopifyGid {
    /// Build a gid from its parts.
    #[must_use]
    pub fn new(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Parse a full `gid://shopify/...` string.
    ///
    /// # Errors
    ///
    /// Returns `GidError` if the prefix, resource or id segment is missing.
    pub fn parse(raw: &str) -> Result<Self, GidError> {
        let rest = raw
            .strip_prefix(GID_PREFIX)
            .ok_or_else(|| GidError::NotAGid(raw.to_string()))?;

        let (resource, id) = rest
            .split_once('/')
            .ok_or_else(|| GidError::MissingId(raw.to_string()))?;

        if resource.is_empty() {
            return Err(GidError::MissingResource(raw.to_string()));
        }
        if id.is_empty() {
            return Err(GidError::MissingId(raw.to_string()));
        }

        Ok(Self::new(resource, id))
    }

    /// The resource type, e.g. `Product`.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// The id segment, e.g. `123`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for ShopifyGid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{GID_PREFIX}{}/{}", self.resource, self.id)
    }
}

impl std::str::FromStr for ShopifyGid {
    type Err = GidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ShopifyGid {
    type Error = GidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ShopifyGid> for String {
    fn from(gid: ShopifyGid) -> Self {
        gid.to_string()
    }
}

/// Normalize a route or CLI argument into a full gid for `resource`.
///
/// Accepts a bare numeric id (`"123"`) or a full gid of the same resource.
///
/// # Errors
///
/// Returns `GidError` if `raw` is neither a numeric id nor a gid of the
/// expected resource.
pub fn normalize_gid(resource: &str, raw: &str) -> Result<String, GidError> {
    let raw = raw.trim();

    if raw.starts_with(GID_PREFIX) {
        let gid = ShopifyGid::parse(raw)?;
        if gid.resource() != resource {
            return Err(GidError::WrongResource {
                expected: resource.to_string(),
                actual: gid.resource().to_string(),
            });
        }
        return Ok(gid.to_string());
    }

    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(GidError::NotAGid(raw.to_string()));
    }

    Ok(ShopifyGid::new(resource, raw).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_gid() {
        let gid = ShopifyGid::parse("gid://shopify/Product/42").unwrap();
        assert_eq!(gid.resource(), "Product");
        assert_eq!(gid.id(), "42");
        assert_eq!(gid.to_string(), "gid://shopify/Product/42");
    }

    #[test]
    fn test_parse_keeps_query_suffix() {
        let gid = ShopifyGid::parse("gid://shopify/InventoryLevel/7?inventory_item_id=9").unwrap();
        assert_eq!(gid.id(), "7?inventory_item_id=9");
    }

    #[test]
    fn test_parse_rejects_missing_parts() {
        assert!(matches!(
            ShopifyGid::parse("Product/42"),
            Err(GidError::NotAGid(_))
        ));
        assert!(matches!(
            ShopifyGid::parse("gid://shopify/Product"),
            Err(GidError::MissingId(_))
        ));
        assert!(matches!(
            ShopifyGid::parse("gid://shopify//42"),
            Err(GidError::MissingResource(_))
        ));
    }

    #[test]
    fn test_normalize_bare_id() {
        assert_eq!(
            normalize_gid(resource::ORDER, "1001").unwrap(),
            "gid://shopify/Order/1001"
        );
    }

    #[test]
    fn test_normalize_rejects_other_resource() {
        let err = normalize_gid(resource::ORDER, "gid://shopify/Product/1").unwrap_err();
        assert_eq!(
            err,
            GidError::WrongResource {
                expected: "Order".to_string(),
                actual: "Product".to_string(),
            }
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_gid(resource::ORDER, "abc").is_err());
        assert!(normalize_gid(resource::ORDER, "").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let gid: ShopifyGid = serde_json::from_str("\"gid://shopify/Customer/5\"").unwrap();
        assert_eq!(gid.resource(), "Customer");
        assert_eq!(
            serde_json::to_string(&gid).unwrap(),
            "\"gid://shopify/Customer/5\""
        );
    }
}
