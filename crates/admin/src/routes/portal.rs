//! Customer POS portal.
//!
//! Customers sign in with their store account (Storefront API), build a
//! cart that enforces per-order limits, and check out as a draft order.
//! The cart lives in the session until checkout.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use freshcounter_core::{Cart, CartError, CheckoutSummary, normalize_gid};
use serde::{Deserialize, Serialize};
use tower_sessions::{
    Expiry, Session,
    cookie::time::{Duration, OffsetDateTime},
};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::{PORTAL_SESSION_DAYS, RequirePortalCustomer},
    models::{CurrentCustomer, session_keys},
    services::CheckoutReceipt,
    shopify::AdminShopifyError,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pos/login", post(login))
        .route("/pos/logout", post(logout))
        .route("/pos/cart", get(cart))
        .route("/pos/cart/lines", post(add_line))
        .route(
            "/pos/cart/lines/{variant_id}",
            put(set_quantity).delete(remove_line),
        )
        .route("/pos/checkout", post(checkout))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in customer, without the access token.
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl From<&CurrentCustomer> for CustomerView {
    fn from(customer: &CurrentCustomer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddLineRequest {
    pub variant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

/// The cart with its running totals.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub cart: Cart,
    pub totals: CheckoutSummary,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let totals = CheckoutSummary {
            total_quantity: cart.total_quantity(),
            total_order_points: cart.total_order_points(),
            total_weight_grams: cart.total_weight_grams(),
        };
        Self { cart, totals }
    }
}

fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("Session error: {e}"))
}

async fn load_cart(session: &Session) -> Result<Cart, AppError> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await
        .map_err(session_error)?
        .unwrap_or_default())
}

async fn store_cart(session: &Session, cart: &Cart) -> Result<(), AppError> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(session_error)
}

fn variant_gid(raw: &str) -> Result<String, AppError> {
    normalize_gid("ProductVariant", raw).map_err(AppError::from)
}

/// Sign in and pin the session to a 30-day expiry.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<CustomerView>, AppError> {
    let customer = state
        .storefront()
        .login(body.email.trim(), &body.password)
        .await
        .map_err(|e| match e {
            AdminShopifyError::Unauthorized(message) => AppError::Unauthorized(message),
            other => AppError::Shopify(other),
        })?;
    let customer = CurrentCustomer::from(customer);

    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(session_keys::CURRENT_CUSTOMER, &customer)
        .await
        .map_err(session_error)?;
    session.set_expiry(Some(Expiry::AtDateTime(
        OffsetDateTime::now_utc() + Duration::days(PORTAL_SESSION_DAYS),
    )));

    tracing::info!(customer_id = %customer.id, "Portal customer signed in");
    Ok(Json(CustomerView::from(&customer)))
}

/// Revoke the Storefront token and clear the session.
///
/// A failed revoke is logged, not returned.
#[instrument(skip(state, session))]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<StatusCode, AppError> {
    let customer = session
        .get::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await
        .ok()
        .flatten();

    if let Some(customer) = customer {
        if let Err(e) = state.storefront().logout(&customer.token.access_token).await {
            tracing::warn!(customer_id = %customer.id, error = %e, "Failed to revoke customer token");
        }
        tracing::info!(customer_id = %customer.id, "Portal customer signed out");
    }

    session.flush().await.map_err(session_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cart(
    RequirePortalCustomer(_customer): RequirePortalCustomer,
    session: Session,
) -> Result<Json<CartView>, AppError> {
    Ok(Json(CartView::from(load_cart(&session).await?)))
}

/// Add one unit of a variant, looked up in the catalog for its limits.
#[instrument(skip(state, customer, session, body), fields(customer_id = %customer.id))]
pub async fn add_line(
    RequirePortalCustomer(customer): RequirePortalCustomer,
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddLineRequest>,
) -> Result<Json<CartView>, AppError> {
    let variant_id = variant_gid(&body.variant_id)?;
    let entry = state
        .shopify()
        .get_variant_catalog_entry(&variant_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Variant {variant_id}")))?;

    let mut cart = load_cart(&session).await?;
    cart.add_line(&entry.product, &entry.variant_id, &entry.variant_title)?;
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::from(cart)))
}

/// Set a line's quantity against the catalog's current limit.
#[instrument(skip(_customer, state, session, body))]
pub async fn set_quantity(
    RequirePortalCustomer(_customer): RequirePortalCustomer,
    State(state): State<AppState>,
    session: Session,
    Path(variant_id): Path<String>,
    Json(body): Json<SetQuantityRequest>,
) -> Result<Json<CartView>, AppError> {
    let variant_id = variant_gid(&variant_id)?;
    let mut cart = load_cart(&session).await?;
    if body.quantity > 0
        && cart.line(&variant_id).is_some()
        && let Some(entry) = state.shopify().get_variant_catalog_entry(&variant_id).await?
    {
        cart.refresh_product(&entry.product);
    }
    cart.set_quantity(&variant_id, body.quantity)?;
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::from(cart)))
}

#[instrument(skip(_customer, session))]
pub async fn remove_line(
    RequirePortalCustomer(_customer): RequirePortalCustomer,
    session: Session,
    Path(variant_id): Path<String>,
) -> Result<Json<CartView>, AppError> {
    let variant_id = variant_gid(&variant_id)?;
    let mut cart = load_cart(&session).await?;
    if !cart.remove_line(&variant_id) {
        return Err(CartError::LineNotFound(variant_id).into());
    }
    store_cart(&session, &cart).await?;

    Ok(Json(CartView::from(cart)))
}

/// Place the cart as a draft order and start a fresh cart.
#[instrument(skip(state, customer, session), fields(customer_id = %customer.id))]
pub async fn checkout(
    RequirePortalCustomer(customer): RequirePortalCustomer,
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutReceipt>, AppError> {
    let cart = load_cart(&session).await?;
    let receipt = state.checkout().submit_cart(&cart, &customer.id).await?;

    session
        .remove::<Cart>(session_keys::CART)
        .await
        .map_err(session_error)?;

    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use freshcounter_core::CartProduct;

    use super::*;

    #[test]
    fn test_cart_view_totals() {
        let mut cart = Cart::new();
        let product = CartProduct {
            product_id: "gid://shopify/Product/1".to_string(),
            title: "Beans".to_string(),
            per_order_limit: Some(3),
            order_points: Some(1),
            weight_grams: Some(400),
        };
        assert!(
            cart.add_line(&product, "gid://shopify/ProductVariant/2", "Can")
                .is_ok()
        );
        assert!(cart.set_quantity("gid://shopify/ProductVariant/2", 3).is_ok());

        let view = CartView::from(cart);
        assert_eq!(view.totals.total_quantity, 3);
        assert_eq!(view.totals.total_order_points, 3);
        assert_eq!(view.totals.total_weight_grams, 1200);
    }

    #[test]
    fn test_variant_gid_accepts_bare_id() {
        assert!(matches!(
            variant_gid("42").as_deref(),
            Ok("gid://shopify/ProductVariant/42")
        ));
        assert!(matches!(variant_gid("not an id"), Err(AppError::InvalidId(_))));
    }
}
