//! HTTP middleware for admin.
//!
//! - `auth` - Staff bearer token and portal customer extractors
//! - `session` - Signed cookie sessions for the POS portal

pub mod auth;
pub mod session;

pub use auth::{RequirePortalCustomer, RequireStaff};
pub use session::{PORTAL_SESSION_DAYS, SESSION_COOKIE_NAME, create_session_layer};
