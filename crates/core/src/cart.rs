//! POS cart with per-order limits.
//!
//! Products can cap how many units a customer may take in one order
//! (`custom.order_limit`) and can cost "order points" (`custom.order_points`)
//! that are checked against the customer's allowance at checkout.
//!
//! Every mutating method either applies fully or leaves the cart untouched
//! and returns a [`CartError`] the portal shows as a warning.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Catalog facts about a product that the cart enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub product_id: String,
    pub title: String,
    /// Maximum units per variant in one order.
    #[serde(default)]
    pub per_order_limit: Option<u32>,
    /// Points charged per unit.
    #[serde(default)]
    pub order_points: Option<u32>,
    /// Unit weight in grams.
    #[serde(default)]
    pub weight_grams: Option<u32>,
}

/// One variant in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub product_title: String,
    pub variant_id: String,
    pub variant_title: String,
    pub quantity: u32,
    #[serde(default)]
    pub per_order_limit: Option<u32>,
    #[serde(default)]
    pub order_points: Option<u32>,
    #[serde(default)]
    pub weight_grams: Option<u32>,
}

impl CartProduct {
    fn allows(&self, quantity: u32) -> bool {
        self.per_order_limit.is_none_or(|limit| quantity <= limit)
    }

    fn limit_error(&self) -> CartError {
        CartError::LimitExceeded {
            title: self.title.clone(),
            limit: self.per_order_limit.unwrap_or_default(),
        }
    }
}

impl CartLine {
    fn allows(&self, quantity: u32) -> bool {
        self.per_order_limit.is_none_or(|limit| quantity <= limit)
    }

    fn limit_error(&self) -> CartError {
        CartError::LimitExceeded {
            title: self.product_title.clone(),
            limit: self.per_order_limit.unwrap_or_default(),
        }
    }

    /// Copy the current catalog facts onto the line.
    fn refresh(&mut self, product: &CartProduct) {
        self.product_title.clone_from(&product.title);
        self.per_order_limit = product.per_order_limit;
        self.order_points = product.order_points;
        self.weight_grams = product.weight_grams;
    }
}

/// Cart rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("You can order at most {limit} of {title}")]
    LimitExceeded { title: String, limit: u32 },
    #[error("Variant {0} is not in the cart")]
    LineNotFound(String),
    #[error("Your cart is empty")]
    Empty,
    #[error("This order needs {required} points but only {allowance} are available")]
    PointsExceeded { required: u64, allowance: u64 },
}

/// Totals shown on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub total_quantity: u64,
    pub total_order_points: u64,
    pub total_weight_grams: u64,
}

/// A customer's in-progress order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub lines: Vec<CartLine>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for `variant_id`, if present.
    #[must_use]
    pub fn line(&self, variant_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.variant_id == variant_id)
    }

    /// Add one unit of a variant.
    ///
    /// Returns the line's new quantity.
    ///
    /// The limit is read from `product`, not from the line, so a lowered
    /// catalog limit applies to lines already in the cart. On success the
    /// line picks up the product's current limit, points and weight.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LimitExceeded` if one more unit would go over the
    /// product's per-order limit; the cart is left unchanged.
    pub fn add_line(
        &mut self,
        product: &CartProduct,
        variant_id: &str,
        variant_title: &str,
    ) -> Result<u32, CartError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.variant_id == variant_id) {
            let next = line.quantity.saturating_add(1);
            if !product.allows(next) {
                return Err(product.limit_error());
            }
            line.refresh(product);
            line.quantity = next;
            return Ok(next);
        }

        if !product.allows(1) {
            return Err(product.limit_error());
        }
        self.lines.push(CartLine {
            product_id: product.product_id.clone(),
            product_title: product.title.clone(),
            variant_id: variant_id.to_string(),
            variant_title: variant_title.to_string(),
            quantity: 1,
            per_order_limit: product.per_order_limit,
            order_points: product.order_points,
            weight_grams: product.weight_grams,
        });
        Ok(1)
    }

    /// Update every line of `product` with its current catalog facts.
    ///
    /// Quantities are kept as they are; the new limit applies to the next
    /// `add_line` or `set_quantity`.
    pub fn refresh_product(&mut self, product: &CartProduct) {
        self.lines
            .iter_mut()
            .filter(|l| l.product_id == product.product_id)
            .for_each(|l| l.refresh(product));
    }

    /// Set a line's quantity; zero removes the line.
    ///
    /// Checks the limit stored on the line; call `refresh_product` first to
    /// apply the catalog's current limit.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` for an unknown variant and
    /// `CartError::LimitExceeded` when `quantity` is over the limit. The cart
    /// is left unchanged in both cases.
    pub fn set_quantity(&mut self, variant_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return if self.remove_line(variant_id) {
                Ok(())
            } else {
                Err(CartError::LineNotFound(variant_id.to_string()))
            };
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.variant_id == variant_id)
            .ok_or_else(|| CartError::LineNotFound(variant_id.to_string()))?;

        if !line.allows(quantity) {
            return Err(line.limit_error());
        }
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a line. Returns whether anything was removed.
    pub fn remove_line(&mut self, variant_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.variant_id != variant_id);
        self.lines.len() != before
    }

    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    #[must_use]
    pub fn total_order_points(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| u64::from(l.quantity) * u64::from(l.order_points.unwrap_or(0)))
            .sum()
    }

    #[must_use]
    pub fn total_weight_grams(&self) -> u64 {
        self.lines
            .iter()
            .map(|l| u64::from(l.quantity) * u64::from(l.weight_grams.unwrap_or(0)))
            .sum()
    }

    /// Gate checkout and return the totals to submit.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Empty` for an empty cart and
    /// `CartError::PointsExceeded` when the points total is over
    /// `points_allowance`.
    pub fn checkout_summary(
        &self,
        points_allowance: Option<u64>,
    ) -> Result<CheckoutSummary, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }

        let total_order_points = self.total_order_points();
        if let Some(allowance) = points_allowance
            && total_order_points > allowance
        {
            return Err(CartError::PointsExceeded {
                required: total_order_points,
                allowance,
            });
        }

        Ok(CheckoutSummary {
            total_quantity: self.total_quantity(),
            total_order_points,
            total_weight_grams: self.total_weight_grams(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rice(limit: Option<u32>) -> CartProduct {
        CartProduct {
            product_id: "gid://shopify/Product/1".to_string(),
            title: "Rice 5kg".to_string(),
            per_order_limit: limit,
            order_points: Some(3),
            weight_grams: Some(5000),
        }
    }

    const VARIANT: &str = "gid://shopify/ProductVariant/11";

    #[test]
    fn test_add_line_respects_limit() {
        let mut cart = Cart::new();
        let product = rice(Some(2));

        assert_eq!(cart.add_line(&product, VARIANT, "Default Title"), Ok(1));
        assert_eq!(cart.add_line(&product, VARIANT, "Default Title"), Ok(2));

        let err = cart.add_line(&product, VARIANT, "Default Title").unwrap_err();
        assert_eq!(
            err,
            CartError::LimitExceeded {
                title: "Rice 5kg".to_string(),
                limit: 2,
            }
        );
        assert_eq!(cart.line(VARIANT).unwrap().quantity, 2);
    }

    #[test]
    fn test_lowered_catalog_limit_applies_to_existing_line() {
        let mut cart = Cart::new();
        cart.add_line(&rice(Some(5)), VARIANT, "x").unwrap();
        cart.add_line(&rice(Some(5)), VARIANT, "x").unwrap();

        let err = cart.add_line(&rice(Some(2)), VARIANT, "x").unwrap_err();
        assert_eq!(
            err,
            CartError::LimitExceeded {
                title: "Rice 5kg".to_string(),
                limit: 2,
            }
        );
        assert_eq!(cart.line(VARIANT).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_line_picks_up_catalog_changes() {
        let mut cart = Cart::new();
        cart.add_line(&rice(Some(5)), VARIANT, "x").unwrap();

        let mut repriced = rice(Some(4));
        repriced.order_points = Some(7);
        cart.add_line(&repriced, VARIANT, "x").unwrap();

        let line = cart.line(VARIANT).unwrap();
        assert_eq!(line.per_order_limit, Some(4));
        assert_eq!(line.order_points, Some(7));
        assert_eq!(cart.total_order_points(), 14);
    }

    #[test]
    fn test_refresh_product_then_set_quantity() {
        let mut cart = Cart::new();
        cart.add_line(&rice(Some(5)), VARIANT, "x").unwrap();

        cart.refresh_product(&rice(Some(2)));
        assert!(cart.set_quantity(VARIANT, 3).is_err());
        assert_eq!(cart.line(VARIANT).unwrap().quantity, 1);
        cart.set_quantity(VARIANT, 2).unwrap();
    }

    #[test]
    fn test_zero_limit_rejects_first_unit() {
        let mut cart = Cart::new();
        assert!(cart.add_line(&rice(Some(0)), VARIANT, "x").is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unlimited_product() {
        let mut cart = Cart::new();
        let product = rice(None);
        for _ in 0..10 {
            cart.add_line(&product, VARIANT, "x").unwrap();
        }
        assert_eq!(cart.total_quantity(), 10);
    }

    #[test]
    fn test_set_quantity_over_limit_keeps_previous() {
        let mut cart = Cart::new();
        cart.add_line(&rice(Some(3)), VARIANT, "x").unwrap();

        assert!(cart.set_quantity(VARIANT, 4).is_err());
        assert_eq!(cart.line(VARIANT).unwrap().quantity, 1);

        cart.set_quantity(VARIANT, 3).unwrap();
        assert_eq!(cart.line(VARIANT).unwrap().quantity, 3);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_line(&rice(None), VARIANT, "x").unwrap();
        cart.set_quantity(VARIANT, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_variant() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity("missing", 2),
            Err(CartError::LineNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_remove_line() {
        let mut cart = Cart::new();
        cart.add_line(&rice(None), VARIANT, "x").unwrap();
        assert!(cart.remove_line(VARIANT));
        assert!(!cart.remove_line(VARIANT));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        let product = rice(None);
        cart.add_line(&product, VARIANT, "x").unwrap();
        cart.add_line(&product, VARIANT, "x").unwrap();

        let beans = CartProduct {
            product_id: "gid://shopify/Product/2".to_string(),
            title: "Beans".to_string(),
            per_order_limit: None,
            order_points: None,
            weight_grams: Some(400),
        };
        cart.add_line(&beans, "gid://shopify/ProductVariant/22", "Tin")
            .unwrap();

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_order_points(), 6);
        assert_eq!(cart.total_weight_grams(), 10_400);
    }

    #[test]
    fn test_checkout_gating() {
        let mut cart = Cart::new();
        assert_eq!(cart.checkout_summary(None), Err(CartError::Empty));

        let product = rice(None);
        cart.add_line(&product, VARIANT, "x").unwrap();
        cart.add_line(&product, VARIANT, "x").unwrap();

        assert_eq!(
            cart.checkout_summary(Some(5)),
            Err(CartError::PointsExceeded {
                required: 6,
                allowance: 5,
            })
        );

        let summary = cart.checkout_summary(Some(6)).unwrap();
        assert_eq!(summary.total_order_points, 6);
        assert_eq!(summary.total_quantity, 2);
    }
}
