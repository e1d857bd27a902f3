//! Saving a product's options and variants.
//!
//! A save is planned locally first (validation, option diff, variant
//! regeneration and diff) and then applied as a sequence of Admin API
//! mutations:
//!
//! 1. create the product, if it is new
//! 2. create added options
//! 3. update changed options
//! 4. delete removed options
//! 5. delete variants whose combination is gone
//! 6. create variants for new combinations
//! 7. update price and barcode of the remaining variants
//!
//! Shopify has no transactions. When a step fails the earlier steps stay
//! applied, and the error lists them so staff can reconcile by hand.

use std::fmt;

use freshcounter_core::{
    OptionDiff, OptionError, ProductOption, Variant, diff_options, diff_variants,
    generate_variants, partition_variants, validate_options,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::shopify::{AdminClient, AdminShopifyError, NewProductInput};

/// One mutation of the save sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStep {
    CreateProduct,
    CreateOptions,
    UpdateOptions,
    DeleteOptions,
    DeleteVariants,
    CreateVariants,
    UpdateVariants,
}

impl fmt::Display for SaveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateProduct => "create product",
            Self::CreateOptions => "create options",
            Self::UpdateOptions => "update options",
            Self::DeleteOptions => "delete options",
            Self::DeleteVariants => "delete variants",
            Self::CreateVariants => "create variants",
            Self::UpdateVariants => "update variants",
        };
        f.write_str(name)
    }
}

/// Errors from saving a product.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The options failed local validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] OptionError),

    /// Neither an existing product id nor new product details were given.
    #[error("A product id or new product details are required")]
    MissingProduct,

    /// A mutation failed. Steps in `completed` were applied and remain.
    #[error("Could not {step} ({}): {source}", describe_completed(.completed))]
    StepFailed {
        step: SaveStep,
        completed: Vec<SaveStep>,
        product_id: Option<String>,
        #[source]
        source: AdminShopifyError,
    },
}

fn describe_completed(completed: &[SaveStep]) -> String {
    if completed.is_empty() {
        return "no earlier changes were applied".to_string();
    }
    let steps: Vec<String> = completed.iter().map(ToString::to_string).collect();
    format!("already applied: {}", steps.join(", "))
}

/// The editor's state at save time.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveProductRequest {
    /// Existing product, or `None` to create one from `new_product`.
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub new_product: Option<NewProductInput>,
    /// Options as loaded.
    #[serde(default)]
    pub initial_options: Vec<ProductOption>,
    /// Options as edited.
    pub current_options: Vec<ProductOption>,
    /// Variants as loaded.
    #[serde(default)]
    pub initial_variants: Vec<Variant>,
    /// Variants as edited in this session.
    #[serde(default)]
    pub current_variants: Vec<Variant>,
}

/// Everything a save will send, computed without touching the network.
#[derive(Debug, Clone)]
pub struct SavePlan {
    pub product_id: Option<String>,
    pub new_product: Option<NewProductInput>,
    pub options: OptionDiff,
    pub variants_to_delete: Vec<String>,
    pub variants_to_create: Vec<Variant>,
    pub variants_to_update: Vec<Variant>,
}

/// What a successful save did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SaveReport {
    pub product_id: String,
    pub completed: Vec<SaveStep>,
    pub deleted_option_ids: Vec<String>,
    pub deleted_variant_ids: Vec<String>,
    pub created_variant_ids: Vec<String>,
}

/// Validate and diff the editor state.
///
/// # Errors
///
/// Returns `SaveError::Invalid` for options that cannot be saved and
/// `SaveError::MissingProduct` when there is nothing to save them to.
pub fn plan_save(request: SaveProductRequest) -> Result<SavePlan, SaveError> {
    validate_options(&request.current_options)?;

    let product_id = request.product_id.filter(|id| !id.trim().is_empty());
    if product_id.is_none() && request.new_product.is_none() {
        return Err(SaveError::MissingProduct);
    }

    let options = diff_options(&request.initial_options, &request.current_options);

    let variants = generate_variants(
        &request.current_options,
        &request.initial_variants,
        &request.current_variants,
    );
    let variants_to_delete = diff_variants(&request.initial_variants, &variants).to_delete;
    let (variants_to_create, variants_to_update) = partition_variants(&variants);

    Ok(SavePlan {
        product_id,
        new_product: request.new_product,
        options,
        variants_to_delete,
        variants_to_create,
        variants_to_update,
    })
}

/// Applies save plans against Shopify.
#[derive(Clone)]
pub struct ProductEditorService {
    shopify: AdminClient,
}

impl ProductEditorService {
    #[must_use]
    pub const fn new(shopify: AdminClient) -> Self {
        Self { shopify }
    }

    /// Plan and apply a save.
    ///
    /// # Errors
    ///
    /// Returns a planning error before any mutation is sent, or
    /// `SaveError::StepFailed` naming the failed step and the applied ones.
    #[instrument(skip(self, request), fields(product_id = ?request.product_id))]
    pub async fn save_product_options(
        &self,
        request: SaveProductRequest,
    ) -> Result<SaveReport, SaveError> {
        let plan = plan_save(request)?;
        self.apply(plan).await
    }

    async fn apply(&self, plan: SavePlan) -> Result<SaveReport, SaveError> {
        let mut report = SaveReport::default();
        let shopify = &self.shopify;

        let product_id = match (plan.product_id, plan.new_product) {
            (Some(id), _) => id,
            (None, Some(input)) => {
                let id = step(&mut report, SaveStep::CreateProduct, None, async {
                    shopify.create_product(&input).await
                })
                .await?;
                tracing::info!(product_id = %id, "Created product");
                id
            }
            (None, None) => return Err(SaveError::MissingProduct),
        };
        report.product_id.clone_from(&product_id);
        let pid = Some(product_id.as_str());

        if !plan.options.added.is_empty() {
            step(&mut report, SaveStep::CreateOptions, pid, async {
                shopify
                    .create_product_options(&product_id, &plan.options.added)
                    .await
            })
            .await?;
        }

        if !plan.options.updated.is_empty() {
            step(&mut report, SaveStep::UpdateOptions, pid, async {
                for update in &plan.options.updated {
                    shopify.update_product_option(&product_id, update).await?;
                }
                Ok::<_, AdminShopifyError>(())
            })
            .await?;
        }

        if !plan.options.deleted_ids.is_empty() {
            let deleted = step(&mut report, SaveStep::DeleteOptions, pid, async {
                shopify
                    .delete_product_options(&product_id, &plan.options.deleted_ids)
                    .await
            })
            .await?;
            report.deleted_option_ids = deleted;
        }

        if !plan.variants_to_delete.is_empty() {
            step(&mut report, SaveStep::DeleteVariants, pid, async {
                shopify
                    .delete_variants(&product_id, &plan.variants_to_delete)
                    .await
            })
            .await?;
            report.deleted_variant_ids = plan.variants_to_delete;
        }

        if !plan.variants_to_create.is_empty() {
            let created = step(&mut report, SaveStep::CreateVariants, pid, async {
                shopify
                    .create_variants(&product_id, &plan.variants_to_create)
                    .await
            })
            .await?;
            report.created_variant_ids = created;
        }

        if !plan.variants_to_update.is_empty() {
            step(&mut report, SaveStep::UpdateVariants, pid, async {
                shopify
                    .update_variants(&product_id, &plan.variants_to_update)
                    .await
            })
            .await?;
        }

        tracing::info!(
            product_id = %report.product_id,
            steps = report.completed.len(),
            "Saved product options"
        );
        Ok(report)
    }
}

/// Run one step, recording it on success.
async fn step<T>(
    report: &mut SaveReport,
    step: SaveStep,
    product_id: Option<&str>,
    action: impl Future<Output = Result<T, AdminShopifyError>>,
) -> Result<T, SaveError> {
    match action.await {
        Ok(value) => {
            report.completed.push(step);
            Ok(value)
        }
        Err(source) => {
            tracing::warn!(
                step = %step,
                completed = ?report.completed,
                error = %source,
                "Product save stopped part way"
            );
            Err(SaveError::StepFailed {
                step,
                completed: report.completed.clone(),
                product_id: product_id.map(String::from),
                source,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use freshcounter_core::{OptionValue, SelectedOption};

    use super::*;

    fn persisted_variant(id: &str, values: &[(&str, &str)], price: &str) -> Variant {
        let selected: Vec<SelectedOption> = values
            .iter()
            .map(|(name, value)| SelectedOption::new(*name, *value))
            .collect();
        let mut variant = Variant::placeholder(selected);
        variant.id = id.to_string();
        variant.is_new = false;
        variant.price = price.parse().unwrap();
        variant
    }

    fn size_option(values: &[(&str, &str)]) -> ProductOption {
        ProductOption {
            id: Some("gid://shopify/ProductOption/1".to_string()),
            name: "Size".to_string(),
            values: values
                .iter()
                .map(|(id, name)| OptionValue::persisted(*id, *name))
                .collect(),
        }
    }

    #[test]
    fn test_plan_replaces_value() {
        let initial = vec![size_option(&[("v-s", "S"), ("v-m", "M")])];
        let mut current = vec![size_option(&[("v-m", "M")])];
        current[0].values.push(OptionValue::new("L"));

        let plan = plan_save(SaveProductRequest {
            product_id: Some("gid://shopify/Product/1".to_string()),
            new_product: None,
            initial_options: initial,
            current_options: current,
            initial_variants: vec![
                persisted_variant("gid://shopify/ProductVariant/1", &[("Size", "S")], "1.00"),
                persisted_variant("gid://shopify/ProductVariant/2", &[("Size", "M")], "2.00"),
            ],
            current_variants: vec![],
        })
        .unwrap();

        assert!(plan.options.added.is_empty());
        assert_eq!(plan.options.updated.len(), 1);
        assert_eq!(plan.options.updated[0].option_values_to_delete, vec!["v-s"]);
        assert_eq!(plan.variants_to_delete, vec!["gid://shopify/ProductVariant/1"]);
        assert_eq!(plan.variants_to_create.len(), 1);
        assert_eq!(plan.variants_to_create[0].title, "L");
        assert_eq!(plan.variants_to_update.len(), 1);
        assert_eq!(plan.variants_to_update[0].price.to_string(), "2.00");
    }

    #[test]
    fn test_plan_new_product() {
        let plan = plan_save(SaveProductRequest {
            product_id: None,
            new_product: Some(NewProductInput {
                title: "Apples".to_string(),
                ..NewProductInput::default()
            }),
            initial_options: vec![],
            current_options: vec![ProductOption::new("Color", ["Red", "Blue"])],
            initial_variants: vec![],
            current_variants: vec![],
        })
        .unwrap();

        assert!(plan.product_id.is_none());
        assert_eq!(plan.options.added.len(), 1);
        assert_eq!(plan.variants_to_create.len(), 2);
        assert!(plan.variants_to_update.is_empty());
        assert!(plan.variants_to_delete.is_empty());
    }

    #[test]
    fn test_plan_rejects_option_without_values() {
        let err = plan_save(SaveProductRequest {
            product_id: Some("gid://shopify/Product/1".to_string()),
            new_product: None,
            initial_options: vec![],
            current_options: vec![ProductOption::new("Size", Vec::<String>::new())],
            initial_variants: vec![],
            current_variants: vec![],
        })
        .unwrap_err();

        assert!(matches!(err, SaveError::Invalid(OptionError::NoValues(_))));
    }

    #[test]
    fn test_plan_requires_product() {
        let err = plan_save(SaveProductRequest {
            product_id: Some("  ".to_string()),
            new_product: None,
            initial_options: vec![],
            current_options: vec![ProductOption::new("Size", ["S"])],
            initial_variants: vec![],
            current_variants: vec![],
        })
        .unwrap_err();

        assert!(matches!(err, SaveError::MissingProduct));
    }

    #[tokio::test]
    async fn test_step_records_completion() {
        let mut report = SaveReport::default();

        let value = step(&mut report, SaveStep::CreateOptions, Some("p"), async {
            Ok::<_, AdminShopifyError>(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);

        let err = step(&mut report, SaveStep::DeleteOptions, Some("p"), async {
            Err::<(), _>(AdminShopifyError::RateLimited(2))
        })
        .await
        .unwrap_err();

        assert_eq!(report.completed, vec![SaveStep::CreateOptions]);
        match err {
            SaveError::StepFailed {
                step,
                completed,
                product_id,
                ..
            } => {
                assert_eq!(step, SaveStep::DeleteOptions);
                assert_eq!(completed, vec![SaveStep::CreateOptions]);
                assert_eq!(product_id.as_deref(), Some("p"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_step_failed_message_lists_applied_steps() {
        let err = SaveError::StepFailed {
            step: SaveStep::CreateVariants,
            completed: vec![SaveStep::CreateOptions, SaveStep::DeleteVariants],
            product_id: None,
            source: AdminShopifyError::RateLimited(5),
        };
        assert_eq!(
            err.to_string(),
            "Could not create variants (already applied: create options, delete variants): \
             Rate limited, retry after 5 seconds"
        );
    }
}
