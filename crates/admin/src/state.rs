//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    services::{CheckoutService, InventoryService, OrderStatusService, ProductEditorService},
    shopify::{AdminClient, StorefrontClient},
};

/// Application state shared across all handlers.
///
/// Holds no domain data: every request reads through to Shopify.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
    storefront: StorefrontClient,
    product_editor: ProductEditorService,
    order_status: OrderStatusService,
    inventory: InventoryService,
    checkout: CheckoutService,
}

impl AppState {
    /// Build clients and services from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        let storefront = StorefrontClient::new(&config.storefront);

        let product_editor = ProductEditorService::new(shopify.clone());
        let order_status =
            OrderStatusService::new(shopify.clone(), config.shopify.shop_name().to_string());
        let inventory =
            InventoryService::new(shopify.clone(), config.pos.inventory_location_id.clone());
        let checkout = CheckoutService::new(shopify.clone(), config.pos.initial_status.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                storefront,
                product_editor,
                order_status,
                inventory,
                checkout,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    #[must_use]
    pub fn product_editor(&self) -> &ProductEditorService {
        &self.inner.product_editor
    }

    #[must_use]
    pub fn order_status(&self) -> &OrderStatusService {
        &self.inner.order_status
    }

    #[must_use]
    pub fn inventory(&self) -> &InventoryService {
        &self.inner.inventory
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}
