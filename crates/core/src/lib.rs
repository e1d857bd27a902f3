//! FreshCounter Core - reconciliation logic shared by the admin service and CLI.
//!
//! This crate holds the pieces of FreshCounter that have invariants worth
//! stating: variant generation, option and variant diffs, the order status
//! log, and the POS cart.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no clock reads. Callers pass in the current time and whatever
//! state they loaded from Shopify, and submit the results themselves.
//!
//! # Modules
//!
//! - [`types`] - Shopify global IDs and non-negative prices
//! - [`options`] - Option validation and the option diff engine
//! - [`variants`] - Variant combination generator and variant diff engine
//! - [`status_log`] - Order status log reconciler and step derivation
//! - [`cart`] - POS cart with per-order limits and derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod options;
pub mod status_log;
pub mod types;
pub mod variants;

pub use cart::{Cart, CartError, CartLine, CartProduct, CheckoutSummary};
pub use options::{
    OptionDiff, OptionError, OptionUpdate, OptionValue, ProductOption, diff_options,
    validate_options,
};
pub use status_log::{
    Actor, FCOS_TAG_PREFIX, StatusDefinition, StatusLogEntry, StatusStep, derive_status_steps,
    fcos_tag, is_status_change, reconcile_status_log, retag_with_status, status_from_tags,
};
pub use types::*;
pub use variants::{
    SelectedOption, Variant, VariantDiff, diff_variants, generate_variants, partition_variants,
    variant_title,
};
