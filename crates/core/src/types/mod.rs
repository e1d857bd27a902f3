//! Core types for FreshCounter.
//!
//! This module provides type-safe wrappers for values that cross the
//! Shopify boundary.

pub mod id;
pub mod price;

pub use id::{GidError, ShopifyGid, normalize_gid, resource};
pub use price::{Price, PriceError};
