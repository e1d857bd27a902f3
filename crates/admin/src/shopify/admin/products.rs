//! Product, option and variant operations for the Admin API.

use freshcounter_core::{
    CartProduct, OptionUpdate, OptionValue, Price, ProductOption, SelectedOption, Variant,
};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, check_user_errors,
    queries::{
        GetProductEditor, GetVariantCatalogEntry, ProductCreate, ProductOptionUpdate,
        ProductOptionsCreate, ProductOptionsDelete, ProductVariantsBulkCreate,
        ProductVariantsBulkDelete, ProductVariantsBulkUpdate, get_product_editor,
        get_variant_catalog_entry::{self, WeightUnit},
        product_variants_bulk_create, product_variants_bulk_update,
    },
};
use crate::shopify::types::{
    NewProductInput, ProductEditor, VariantCatalogEntry, parse_integer_metafield,
};

impl AdminClient {
    /// Load a product's options and variants for the editor.
    ///
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product_editor(
        &self,
        id: &str,
    ) -> Result<Option<ProductEditor>, AdminShopifyError> {
        let response = self
            .execute::<GetProductEditor>(get_product_editor::Variables { id: id.to_string() })
            .await?;

        Ok(response.product.map(convert_product_editor))
    }

    /// Create an empty draft product. Returns the new product id.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the input.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: &NewProductInput) -> Result<String, AdminShopifyError> {
        use super::queries::product_create::{ProductCreateInput, ProductStatus, Variables};

        let variables = Variables {
            product: ProductCreateInput {
                title: Some(input.title.clone()),
                vendor: input.vendor.clone(),
                product_type: input.product_type.clone(),
                tags: Some(input.tags.clone()),
                status: Some(ProductStatus::DRAFT),
            },
        };

        let payload = self
            .execute::<ProductCreate>(variables)
            .await?
            .product_create
            .ok_or_else(|| AdminShopifyError::missing("productCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .product
            .map(|p| p.id)
            .ok_or_else(|| AdminShopifyError::missing("product"))
    }

    /// Add new options with their values.
    ///
    /// Existing variants are left alone; variants for the new combinations
    /// are created separately.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects any option.
    #[instrument(skip(self, options), fields(product_id = %product_id, count = options.len()))]
    pub async fn create_product_options(
        &self,
        product_id: &str,
        options: &[ProductOption],
    ) -> Result<(), AdminShopifyError> {
        use super::queries::product_options_create::{
            OptionCreateInput, OptionValueCreateInput, ProductOptionCreateVariantStrategy,
            Variables,
        };

        let variables = Variables {
            product_id: product_id.to_string(),
            options: options
                .iter()
                .map(|o| OptionCreateInput {
                    name: Some(o.name.clone()),
                    values: Some(
                        o.value_names()
                            .map(|name| OptionValueCreateInput {
                                name: Some(name.to_string()),
                            })
                            .collect(),
                    ),
                })
                .collect(),
            variant_strategy: Some(ProductOptionCreateVariantStrategy::LEAVE_AS_IS),
        };

        let payload = self
            .execute::<ProductOptionsCreate>(variables)
            .await?
            .product_options_create
            .ok_or_else(|| AdminShopifyError::missing("productOptionsCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))
    }

    /// Apply one option's rename and value changes.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the update.
    #[instrument(skip(self, update), fields(product_id = %product_id, option_id = %update.option_id))]
    pub async fn update_product_option(
        &self,
        product_id: &str,
        update: &OptionUpdate,
    ) -> Result<(), AdminShopifyError> {
        use super::queries::product_option_update::{
            OptionUpdateInput, OptionValueCreateInput, OptionValueUpdateInput, Variables,
        };

        let variables = Variables {
            product_id: product_id.to_string(),
            option: OptionUpdateInput {
                id: update.option_id.clone(),
                name: update.name.clone(),
            },
            option_values_to_add: Some(
                update
                    .option_values_to_add
                    .iter()
                    .map(|v| OptionValueCreateInput {
                        name: Some(v.name.clone()),
                    })
                    .collect(),
            ),
            option_values_to_update: Some(
                update
                    .option_values_to_update
                    .iter()
                    .filter_map(|v| {
                        v.id.as_ref().map(|id| OptionValueUpdateInput {
                            id: id.clone(),
                            name: Some(v.name.clone()),
                        })
                    })
                    .collect(),
            ),
            option_values_to_delete: Some(update.option_values_to_delete.clone()),
        };

        let payload = self
            .execute::<ProductOptionUpdate>(variables)
            .await?
            .product_option_update
            .ok_or_else(|| AdminShopifyError::missing("productOptionUpdate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))
    }

    /// Delete options by id. Returns the ids Shopify reports as deleted.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the deletion.
    #[instrument(skip(self, option_ids), fields(product_id = %product_id, count = option_ids.len()))]
    pub async fn delete_product_options(
        &self,
        product_id: &str,
        option_ids: &[String],
    ) -> Result<Vec<String>, AdminShopifyError> {
        use super::queries::product_options_delete::Variables;

        let variables = Variables {
            product_id: product_id.to_string(),
            options: option_ids.to_vec(),
        };

        let payload = self
            .execute::<ProductOptionsDelete>(variables)
            .await?
            .product_options_delete
            .ok_or_else(|| AdminShopifyError::missing("productOptionsDelete payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        Ok(payload.deleted_options_ids.unwrap_or_default())
    }

    /// Create variants. Returns the ids of the created variants.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects any variant.
    #[instrument(skip(self, variants), fields(product_id = %product_id, count = variants.len()))]
    pub async fn create_variants(
        &self,
        product_id: &str,
        variants: &[Variant],
    ) -> Result<Vec<String>, AdminShopifyError> {
        use super::queries::product_variants_bulk_create::{
            ProductVariantsBulkCreateStrategy, Variables,
        };

        let variables = Variables {
            product_id: product_id.to_string(),
            variants: variants.iter().map(create_variant_input).collect(),
            strategy: Some(ProductVariantsBulkCreateStrategy::DEFAULT),
        };

        let payload = self
            .execute::<ProductVariantsBulkCreate>(variables)
            .await?
            .product_variants_bulk_create
            .ok_or_else(|| AdminShopifyError::missing("productVariantsBulkCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        Ok(payload
            .product_variants
            .unwrap_or_default()
            .into_iter()
            .map(|v| v.id)
            .collect())
    }

    /// Update price and barcode of persisted variants.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects any variant.
    #[instrument(skip(self, variants), fields(product_id = %product_id, count = variants.len()))]
    pub async fn update_variants(
        &self,
        product_id: &str,
        variants: &[Variant],
    ) -> Result<(), AdminShopifyError> {
        use super::queries::product_variants_bulk_update::Variables;

        let variables = Variables {
            product_id: product_id.to_string(),
            variants: variants.iter().map(update_variant_input).collect(),
        };

        let payload = self
            .execute::<ProductVariantsBulkUpdate>(variables)
            .await?
            .product_variants_bulk_update
            .ok_or_else(|| AdminShopifyError::missing("productVariantsBulkUpdate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))
    }

    /// Delete variants by id.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the deletion.
    #[instrument(skip(self, variant_ids), fields(product_id = %product_id, count = variant_ids.len()))]
    pub async fn delete_variants(
        &self,
        product_id: &str,
        variant_ids: &[String],
    ) -> Result<(), AdminShopifyError> {
        use super::queries::product_variants_bulk_delete::Variables;

        let variables = Variables {
            product_id: product_id.to_string(),
            variants_ids: variant_ids.to_vec(),
        };

        let payload = self
            .execute::<ProductVariantsBulkDelete>(variables)
            .await?
            .product_variants_bulk_delete
            .ok_or_else(|| AdminShopifyError::missing("productVariantsBulkDelete payload"))?;
        check_user_errors(user_errors!(payload.user_errors))
    }

    /// Look up a variant with the product facts the cart enforces.
    ///
    /// Returns `None` if the variant does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(variant_id = %variant_id))]
    pub async fn get_variant_catalog_entry(
        &self,
        variant_id: &str,
    ) -> Result<Option<VariantCatalogEntry>, AdminShopifyError> {
        let response = self
            .execute::<GetVariantCatalogEntry>(get_variant_catalog_entry::Variables {
                id: variant_id.to_string(),
            })
            .await?;

        Ok(response.product_variant.map(convert_catalog_entry))
    }
}

/// A new variant, identified by its option values.
fn create_variant_input(variant: &Variant) -> product_variants_bulk_create::ProductVariantsBulkInput {
    use product_variants_bulk_create::{ProductVariantsBulkInput, VariantOptionValueInput};

    ProductVariantsBulkInput {
        id: None,
        price: Some(variant.price.to_string()),
        barcode: (!variant.barcode.is_empty()).then(|| variant.barcode.clone()),
        option_values: Some(
            variant
                .selected_options
                .iter()
                .map(|o| VariantOptionValueInput {
                    option_name: Some(o.name.clone()),
                    name: Some(o.value.clone()),
                })
                .collect(),
        ),
    }
}

/// A persisted variant, identified by id. Option values are left untouched.
fn update_variant_input(variant: &Variant) -> product_variants_bulk_update::ProductVariantsBulkInput {
    product_variants_bulk_update::ProductVariantsBulkInput {
        id: Some(variant.id.clone()),
        price: Some(variant.price.to_string()),
        barcode: (!variant.barcode.is_empty()).then(|| variant.barcode.clone()),
        option_values: None,
    }
}

fn convert_product_editor(product: get_product_editor::GetProductEditorProduct) -> ProductEditor {
    let mut options = product.options;
    options.sort_by_key(|o| o.position);

    let options = options
        .into_iter()
        .map(|o| ProductOption {
            id: Some(o.id),
            name: o.name,
            values: o
                .option_values
                .into_iter()
                .map(|v| OptionValue::persisted(v.id, v.name))
                .collect(),
        })
        .collect();

    let variants = product
        .variants
        .nodes
        .into_iter()
        .map(|v| Variant {
            id: v.id,
            title: v.title,
            price: v.price.parse().unwrap_or_else(|_| Price::zero()),
            barcode: v.barcode.unwrap_or_default(),
            selected_options: v
                .selected_options
                .into_iter()
                .map(|o| SelectedOption::new(o.name, o.value))
                .collect(),
            is_new: false,
        })
        .collect();

    ProductEditor {
        product_id: product.id,
        title: product.title,
        options,
        variants,
    }
}

fn convert_catalog_entry(
    variant: get_variant_catalog_entry::GetVariantCatalogEntryProductVariant,
) -> VariantCatalogEntry {
    let item = variant.inventory_item;
    let weight_grams = item
        .measurement
        .weight
        .and_then(|w| weight_to_grams(&w.unit, w.value));

    VariantCatalogEntry {
        variant_id: variant.id,
        variant_title: variant.title,
        inventory_item_id: Some(item.id),
        product: CartProduct {
            product_id: variant.product.id,
            title: variant.product.title,
            per_order_limit: parse_integer_metafield(
                variant.product.order_limit.as_ref().map(|m| m.value.as_str()),
            ),
            order_points: parse_integer_metafield(
                variant.product.order_points.as_ref().map(|m| m.value.as_str()),
            ),
            weight_grams,
        },
    }
}

/// Convert a Shopify weight to whole grams.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn weight_to_grams(unit: &WeightUnit, value: f64) -> Option<u32> {
    let grams = match unit {
        WeightUnit::GRAMS => value,
        WeightUnit::KILOGRAMS => value * 1000.0,
        WeightUnit::OUNCES => value * 28.349_523_125,
        WeightUnit::POUNDS => value * 453.592_37,
        WeightUnit::Other(_) => return None,
    };
    (grams.is_finite() && grams >= 0.0).then(|| grams.round() as u32)
}
