//! Types kept in the portal session.

pub mod session;

pub use session::{CurrentCustomer, keys as session_keys};
