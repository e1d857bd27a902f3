//! Product options and the option diff engine.
//!
//! The product editor holds two copies of a product's options: the list that
//! was loaded from Shopify (`initial`) and the list the staff member has been
//! editing (`current`). [`diff_options`] turns the pair into the three
//! mutation payloads Shopify expects: options to create, options to delete,
//! and per-option value additions/removals.
//!
//! Renaming a value in place is not supported. A rename shows up as the old
//! value deleted and the new one added.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single value of a product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Persisted value id; `None` for values added in this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl OptionValue {
    /// A value that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// A value loaded from Shopify.
    #[must_use]
    pub fn persisted(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }
}

/// A named product attribute such as "Size" with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Persisted option id; `None` for options added in this session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub values: Vec<OptionValue>,
}

impl ProductOption {
    /// Build an unsaved option from plain value names.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            name: name.into(),
            values: values.into_iter().map(OptionValue::new).collect(),
        }
    }

    /// Attach a persisted id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Value names in display order.
    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.name.as_str())
    }

    /// Whether this option has never been saved to Shopify.
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// Validation failures caught before any mutation is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("Option name can't be blank")]
    BlankName,
    #[error("Option '{0}' must have at least one value")]
    NoValues(String),
    #[error("Option '{option}' has a blank value")]
    BlankValue { option: String },
    #[error("Option '{option}' lists '{value}' more than once")]
    DuplicateValue { option: String, value: String },
}

impl OptionError {
    /// Form field the error belongs to, for inline display.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::NoValues(_) | Self::BlankValue { .. } | Self::DuplicateValue { .. } => "values",
        }
    }
}

/// Check the edited options before they are submitted.
///
/// # Errors
///
/// Returns the first problem found, in option order.
pub fn validate_options(options: &[ProductOption]) -> Result<(), OptionError> {
    for option in options {
        if option.name.trim().is_empty() {
            return Err(OptionError::BlankName);
        }
        if option.values.is_empty() {
            return Err(OptionError::NoValues(option.name.clone()));
        }

        let mut seen = HashSet::new();
        for value in &option.values {
            if value.name.trim().is_empty() {
                return Err(OptionError::BlankValue {
                    option: option.name.clone(),
                });
            }
            if !seen.insert(value.name.as_str()) {
                return Err(OptionError::DuplicateValue {
                    option: option.name.clone(),
                    value: value.name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Value changes for one persisted option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionUpdate {
    /// Id of the option being updated.
    pub option_id: String,
    /// New option name, set only when the option was renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Values to create (name only; Shopify assigns ids).
    pub option_values_to_add: Vec<OptionValue>,
    /// Ids of persisted values that were removed.
    pub option_values_to_delete: Vec<String>,
    /// Always empty: in-place value renames are modelled as delete + add.
    pub option_values_to_update: Vec<OptionValue>,
}

impl OptionUpdate {
    fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.option_values_to_add.is_empty()
            && self.option_values_to_delete.is_empty()
    }
}

/// The three mutation payloads derived from an edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDiff {
    /// Options that were never persisted.
    pub added: Vec<ProductOption>,
    /// Ids of persisted options that no longer appear.
    pub deleted_ids: Vec<String>,
    /// Per-option value changes; no-op entries are omitted.
    pub updated: Vec<OptionUpdate>,
}

impl OptionDiff {
    /// Whether submitting this diff would change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted_ids.is_empty() && self.updated.is_empty()
    }
}

/// Compare the loaded options against the edited ones.
///
/// - `added`: every `current` option without an id.
/// - `deleted_ids`: ids of `initial` options whose name is gone from
///   `current`. Options without an id are skipped since Shopify never saw
///   them, and an option whose id is still present in `current` is treated
///   as renamed rather than deleted.
/// - `updated`: for every `current` option with an id that matches an
///   `initial` option, the values to add (by name) and the ids of values to
///   delete. Options with nothing to change are left out.
#[must_use]
pub fn diff_options(initial: &[ProductOption], current: &[ProductOption]) -> OptionDiff {
    let added: Vec<ProductOption> = current.iter().filter(|o| o.is_new()).cloned().collect();

    let current_names: HashSet<&str> = current.iter().map(|o| o.name.as_str()).collect();
    let current_ids: HashSet<&str> = current.iter().filter_map(|o| o.id.as_deref()).collect();

    let deleted_ids: Vec<String> = initial
        .iter()
        .filter(|o| !current_names.contains(o.name.as_str()))
        .filter_map(|o| o.id.as_deref())
        .filter(|id| !current_ids.contains(id))
        .map(str::to_string)
        .collect();

    let updated: Vec<OptionUpdate> = current
        .iter()
        .filter_map(|option| {
            let id = option.id.as_deref()?;
            let before = initial.iter().find(|o| o.id.as_deref() == Some(id))?;
            let update = diff_option_values(id, before, option);
            (!update.is_noop()).then_some(update)
        })
        .collect();

    OptionDiff {
        added,
        deleted_ids,
        updated,
    }
}

fn diff_option_values(id: &str, before: &ProductOption, after: &ProductOption) -> OptionUpdate {
    let before_names: HashSet<&str> = before.value_names().collect();
    let after_names: HashSet<&str> = after.value_names().collect();

    let option_values_to_add = after
        .values
        .iter()
        .filter(|v| !before_names.contains(v.name.as_str()))
        .map(|v| OptionValue::new(v.name.clone()))
        .collect();

    let option_values_to_delete = before
        .values
        .iter()
        .filter(|v| !after_names.contains(v.name.as_str()))
        .filter_map(|v| v.id.clone())
        .collect();

    OptionUpdate {
        option_id: id.to_string(),
        name: (before.name != after.name).then(|| after.name.clone()),
        option_values_to_add,
        option_values_to_delete,
        option_values_to_update: Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn persisted_size() -> ProductOption {
        ProductOption {
            id: Some("1".to_string()),
            name: "Size".to_string(),
            values: vec![
                OptionValue::persisted("v-s", "S"),
                OptionValue::persisted("v-m", "M"),
            ],
        }
    }

    #[test]
    fn test_value_swap_produces_add_and_delete() {
        let initial = vec![persisted_size()];
        let current = vec![ProductOption::new("Size", ["M", "L"]).with_id("1")];

        let diff = diff_options(&initial, &current);

        assert!(diff.added.is_empty());
        assert!(diff.deleted_ids.is_empty());
        assert_eq!(diff.updated.len(), 1);

        let update = &diff.updated[0];
        assert_eq!(update.option_id, "1");
        assert_eq!(update.name, None);
        assert_eq!(update.option_values_to_add, vec![OptionValue::new("L")]);
        assert_eq!(update.option_values_to_delete, vec!["v-s".to_string()]);
        assert!(update.option_values_to_update.is_empty());
    }

    #[test]
    fn test_unchanged_option_is_omitted() {
        let initial = vec![persisted_size()];
        let current = vec![persisted_size()];

        let diff = diff_options(&initial, &current);
        assert!(diff.updated.is_empty());
        assert!(diff.is_empty());
    }

    #[test]
    fn test_reordered_values_are_a_noop() {
        let initial = vec![persisted_size()];
        let current = vec![ProductOption::new("Size", ["M", "S"]).with_id("1")];

        assert!(diff_options(&initial, &current).updated.is_empty());
    }

    #[test]
    fn test_new_option_is_added() {
        let initial = vec![persisted_size()];
        let current = vec![persisted_size(), ProductOption::new("Color", ["Red"])];

        let diff = diff_options(&initial, &current);
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.added[0].name, "Color");
        assert!(diff.deleted_ids.is_empty());
    }

    #[test]
    fn test_removed_option_is_deleted() {
        let color = ProductOption::new("Color", ["Red"]).with_id("2");
        let initial = vec![persisted_size(), color];
        let current = vec![persisted_size()];

        let diff = diff_options(&initial, &current);
        assert_eq!(diff.deleted_ids, vec!["2".to_string()]);
    }

    #[test]
    fn test_unsaved_option_is_never_deleted() {
        let initial = vec![ProductOption::new("Color", ["Red"])];
        let diff = diff_options(&initial, &[]);
        assert!(diff.deleted_ids.is_empty());
    }

    #[test]
    fn test_renamed_option_is_updated_not_deleted() {
        let initial = vec![persisted_size()];
        let mut renamed = persisted_size();
        renamed.name = "Pack Size".to_string();

        let diff = diff_options(&initial, &[renamed]);
        assert!(diff.deleted_ids.is_empty());
        assert_eq!(diff.updated.len(), 1);
        assert_eq!(diff.updated[0].name.as_deref(), Some("Pack Size"));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let err = validate_options(&[ProductOption::new("Size", Vec::<String>::new())]);
        assert_eq!(err, Err(OptionError::NoValues("Size".to_string())));
    }

    #[test]
    fn test_validate_rejects_duplicate_values() {
        let err = validate_options(&[ProductOption::new("Size", ["S", "S"])]);
        assert_eq!(
            err,
            Err(OptionError::DuplicateValue {
                option: "Size".to_string(),
                value: "S".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let err = validate_options(&[ProductOption::new("  ", ["S"])]).unwrap_err();
        assert_eq!(err, OptionError::BlankName);
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_validate_accepts_good_options() {
        let options = vec![
            ProductOption::new("Size", ["S", "M"]),
            ProductOption::new("Color", ["Red"]),
        ];
        assert_eq!(validate_options(&options), Ok(()));
    }
}
