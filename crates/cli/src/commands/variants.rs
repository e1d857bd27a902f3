//! Variant preview command.

use std::path::Path;

use freshcounter_core::{ProductOption, Variant, diff_variants, generate_variants};
use serde::{Deserialize, Serialize};

use super::{print_json, read_json};

/// Editor state read from the input file.
#[derive(Debug, Deserialize)]
pub struct PreviewInput {
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub prior_variants: Vec<Variant>,
    #[serde(default)]
    pub current_variants: Vec<Variant>,
}

#[derive(Debug, Serialize)]
pub struct PreviewOutput {
    pub variants: Vec<Variant>,
    pub to_delete: Vec<String>,
}

/// Generate variants for the options in `input`.
#[must_use]
pub fn build_preview(input: &PreviewInput) -> PreviewOutput {
    let variants = generate_variants(&input.options, &input.prior_variants, &input.current_variants);
    let to_delete = diff_variants(&input.prior_variants, &variants).to_delete;
    PreviewOutput {
        variants,
        to_delete,
    }
}

/// Print the preview for an editor state file.
pub fn preview(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let input: PreviewInput = read_json(file)?;
    let output = build_preview(&input);
    tracing::info!(
        variants = output.variants.len(),
        to_delete = output.to_delete.len(),
        "Generated variants"
    );
    print_json(&output)?;
    Ok(())
}
