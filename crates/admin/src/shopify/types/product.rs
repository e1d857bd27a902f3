//! Product domain types for the product editor and the POS catalog.

use freshcounter_core::{CartProduct, ProductOption, Variant};
use serde::{Deserialize, Serialize};

/// Metafield key holding a product's per-order limit.
pub const ORDER_LIMIT_METAFIELD_KEY: &str = "order_limit";

/// Metafield key holding a product's order points per unit.
pub const ORDER_POINTS_METAFIELD_KEY: &str = "order_points";

/// A product as the option/variant editor sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEditor {
    pub product_id: String,
    pub title: String,
    /// Options in position order, values with their ids.
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
}

/// Input for creating a product before its options are saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProductInput {
    pub title: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A variant looked up for the POS cart or an inventory adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCatalogEntry {
    pub variant_id: String,
    pub variant_title: String,
    pub inventory_item_id: Option<String>,
    /// Product-level limits and points the cart enforces.
    pub product: CartProduct,
}
