//! Domain types for the Shopify APIs.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! shapes declared next to each operation in `admin::queries`.

pub mod common;
pub mod customer;
pub mod inventory;
pub mod media;
pub mod metaobject;
pub mod order;
pub mod product;

// Re-export all types for convenience
pub use common::*;
pub use customer::*;
pub use inventory::*;
pub use media::*;
pub use metaobject::*;
pub use order::*;
pub use product::*;
