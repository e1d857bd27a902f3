//! Business logic services for admin.
//!
//! Each service holds a clone of the Admin API client and sequences the
//! calls for one workflow. Local validation happens before the first call;
//! nothing is retried.
//!
//! # Services
//!
//! - `product_editor` - Option and variant save sequence
//! - `order_status` - Custom order status, log and tag updates
//! - `inventory` - Inventory adjustments with an audit log entry
//! - `checkout` - POS portal cart checkout as a draft order

pub mod checkout;
pub mod inventory;
pub mod order_status;
pub mod product_editor;

pub use checkout::{CheckoutError, CheckoutReceipt, CheckoutService};
pub use inventory::{AdjustInventoryRequest, AdjustReport, InventoryError, InventoryService};
pub use order_status::{OrderStatusError, OrderStatusService, StatusUpdateOutcome};
pub use product_editor::{
    ProductEditorService, SaveError, SaveProductRequest, SaveReport, SaveStep, plan_save,
};
