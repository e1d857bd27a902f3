//! Variant combination generator and variant diff engine.
//!
//! A product's variants are always the full Cartesian product of its option
//! values. Whenever the options change the editor regenerates the whole set
//! with [`generate_variants`], carrying over the id, price and barcode of any
//! combination that already existed.
//!
//! Un-persisted variants have no stable identity, so combinations are matched
//! by title (`"S / Red"`). Two identical combinations therefore collide;
//! [`crate::options::validate_options`] rejects duplicate values before save.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::options::ProductOption;
use crate::types::Price;

/// Prefix of the placeholder id given to variants that do not exist yet.
pub const NEW_VARIANT_PREFIX: &str = "new-";

/// Separator between option values in a variant title.
pub const TITLE_SEPARATOR: &str = " / ";

/// Title Shopify gives the implicit variant of a product with no options.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// One option/value pair of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One concrete combination of option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Shopify gid, or `new-<title>` for variants not yet created.
    pub id: String,
    /// Option values joined with `" / "`.
    pub title: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub barcode: String,
    pub selected_options: Vec<SelectedOption>,
    #[serde(default)]
    pub is_new: bool,
}

impl Variant {
    /// A placeholder variant for a combination that does not exist yet.
    #[must_use]
    pub fn placeholder(selected_options: Vec<SelectedOption>) -> Self {
        let title = variant_title(&selected_options);
        Self {
            id: format!("{NEW_VARIANT_PREFIX}{title}"),
            title,
            price: Price::zero(),
            barcode: String::new(),
            selected_options,
            is_new: true,
        }
    }

    /// Whether the id refers to a record Shopify knows about.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.is_new && !self.id.starts_with(NEW_VARIANT_PREFIX)
    }
}

/// Join the selected values into the canonical variant title.
#[must_use]
pub fn variant_title(selected_options: &[SelectedOption]) -> String {
    selected_options
        .iter()
        .map(|s| s.value.as_str())
        .collect::<Vec<_>>()
        .join(TITLE_SEPARATOR)
}

/// Build the full set of variants for `options`.
///
/// Combinations are produced in option order, then value order. For each
/// combination a variant with the same title is looked up first in
/// `current` (edits made in this session) and then in `prior` (what Shopify
/// has). A match keeps its id, price, barcode and `is_new` flag; anything else
/// becomes a placeholder priced `"0.00"`.
///
/// No options yields no variants. Shopify's implicit default variant is the
/// caller's concern.
#[must_use]
pub fn generate_variants(
    options: &[ProductOption],
    prior: &[Variant],
    current: &[Variant],
) -> Vec<Variant> {
    if options.is_empty() {
        return Vec::new();
    }

    let current_by_title = index_by_title(current);
    let prior_by_title = index_by_title(prior);

    let mut combinations = Vec::new();
    collect_combinations(options, &mut Vec::with_capacity(options.len()), &mut combinations);

    combinations
        .into_iter()
        .map(|selected_options| {
            let title = variant_title(&selected_options);
            match current_by_title
                .get(title.as_str())
                .or_else(|| prior_by_title.get(title.as_str()))
            {
                Some(existing) => Variant {
                    id: existing.id.clone(),
                    title,
                    price: existing.price,
                    barcode: existing.barcode.clone(),
                    selected_options,
                    is_new: existing.is_new,
                },
                None => Variant::placeholder(selected_options),
            }
        })
        .collect()
}

/// First variant wins when titles collide.
fn index_by_title(variants: &[Variant]) -> HashMap<&str, &Variant> {
    let mut index = HashMap::with_capacity(variants.len());
    for variant in variants {
        index.entry(variant.title.as_str()).or_insert(variant);
    }
    index
}

fn collect_combinations(
    options: &[ProductOption],
    branch: &mut Vec<SelectedOption>,
    out: &mut Vec<Vec<SelectedOption>>,
) {
    let Some((option, rest)) = options.split_first() else {
        out.push(branch.clone());
        return;
    };

    for value in &option.values {
        branch.push(SelectedOption::new(option.name.clone(), value.name.clone()));
        collect_combinations(rest, branch, out);
        branch.pop();
    }
}

/// Variants that must be removed explicitly.
///
/// Creates and updates are sent as the full current list, so only
/// deletions need their own id list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDiff {
    pub to_delete: Vec<String>,
}

/// Ids of `initial` variants with no persisted counterpart (by title) in
/// `current`.
#[must_use]
pub fn diff_variants(initial: &[Variant], current: &[Variant]) -> VariantDiff {
    let kept: HashSet<&str> = current
        .iter()
        .filter(|v| v.is_persisted())
        .map(|v| v.title.as_str())
        .collect();

    let to_delete = initial
        .iter()
        .filter(|v| v.is_persisted() && !kept.contains(v.title.as_str()))
        .map(|v| v.id.clone())
        .collect();

    VariantDiff { to_delete }
}

/// Split the current list into variants to create and variants to update.
#[must_use]
pub fn partition_variants(current: &[Variant]) -> (Vec<Variant>, Vec<Variant>) {
    current.iter().cloned().partition(|v| !v.is_persisted())
}
