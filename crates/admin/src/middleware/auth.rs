//! Authentication extractors.
//!
//! Staff requests come from the embedded admin UI with a shared bearer
//! token and the staff member's name in headers. Portal requests carry the
//! signed session cookie set at login.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use freshcounter_core::Actor;
use secrecy::ExposeSecret;
use tower_sessions::Session;

use crate::error::{AppError, set_sentry_user};
use crate::models::{CurrentCustomer, session_keys};
use crate::state::AppState;

/// Header carrying the staff member's first name.
pub const STAFF_FIRST_NAME_HEADER: &str = "x-staff-first-name";

/// Header carrying the staff member's last name.
pub const STAFF_LAST_NAME_HEADER: &str = "x-staff-last-name";

/// Extractor that requires the staff bearer token.
///
/// Yields the acting staff member, recorded in status logs and inventory
/// logs. A request with a valid token but no staff name is a bad request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireStaff(actor): RequireStaff) -> impl IntoResponse {
///     actor.display_name()
/// }
/// ```
pub struct RequireStaff(pub Actor);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        if !constant_time_compare(token, state.config().api_token.expose_secret()) {
            tracing::warn!(path = %parts.uri.path(), "Rejected staff request with a bad token");
            return Err(AppError::Unauthorized("Invalid bearer token".to_string()));
        }

        staff_actor(&parts.headers).map(Self)
    }
}

/// Extractor that requires a signed-in portal customer.
pub struct RequirePortalCustomer(pub CurrentCustomer);

impl<S> FromRequestParts<S> for RequirePortalCustomer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Internal("Session layer missing".to_string()))?;

        let customer: CurrentCustomer = session
            .get(session_keys::CURRENT_CUSTOMER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| AppError::Unauthorized("Please sign in".to_string()))?;

        set_sentry_user(&customer.id, customer.email.as_deref());
        Ok(Self(customer))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn staff_actor(headers: &HeaderMap) -> Result<Actor, AppError> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    let actor = Actor::new(header(STAFF_FIRST_NAME_HEADER), header(STAFF_LAST_NAME_HEADER));
    if actor.display_name().is_empty() {
        return Err(AppError::BadRequest(
            "Missing X-Staff-First-Name and X-Staff-Last-Name headers".to_string(),
        ));
    }
    Ok(actor)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));

        headers.insert("authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_staff_actor_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(STAFF_FIRST_NAME_HEADER, HeaderValue::from_static(" Ana "));
        headers.insert(STAFF_LAST_NAME_HEADER, HeaderValue::from_static("Ruiz"));
        assert_eq!(staff_actor(&headers).unwrap().display_name(), "Ana Ruiz");

        let mut headers = HeaderMap::new();
        headers.insert(STAFF_FIRST_NAME_HEADER, HeaderValue::from_static("Ana"));
        assert_eq!(staff_actor(&headers).unwrap().display_name(), "Ana");
    }

    #[test]
    fn test_staff_actor_requires_a_name() {
        assert!(matches!(
            staff_actor(&HeaderMap::new()),
            Err(AppError::BadRequest(_))
        ));

        let mut headers = HeaderMap::new();
        headers.insert(STAFF_FIRST_NAME_HEADER, HeaderValue::from_static("  "));
        headers.insert(STAFF_LAST_NAME_HEADER, HeaderValue::from_static(""));
        assert!(staff_actor(&headers).is_err());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "helloo"));
    }
}
