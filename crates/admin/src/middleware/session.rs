//! Session middleware configuration for the POS portal.
//!
//! Sessions live in memory; the cookie is signed with a key derived from
//! `PORTAL_SESSION_SECRET`. A restart signs every customer out.

use secrecy::ExposeSecret;
use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer,
    cookie::{Key, SameSite},
    service::SignedCookie,
};

use crate::config::{AdminConfig, ConfigError};

/// Session cookie name for the portal.
pub const SESSION_COOKIE_NAME: &str = "fc_portal_session";

/// Days a portal login stays valid.
pub const PORTAL_SESSION_DAYS: i64 = 30;

/// Create the signed session layer with an in-memory store.
///
/// Sessions expire on inactivity until login, which pins the expiry to a
/// fixed date (see `routes::portal`).
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` if the secret is too short to
/// derive a signing key.
pub fn create_session_layer(
    config: &AdminConfig,
) -> Result<SessionManagerLayer<MemoryStore, SignedCookie>, ConfigError> {
    let key = Key::try_from(config.portal_session_secret.expose_secret().as_bytes()).map_err(
        |e| ConfigError::InsecureSecret("PORTAL_SESSION_SECRET".to_string(), e.to_string()),
    )?;

    Ok(SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::days(PORTAL_SESSION_DAYS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
