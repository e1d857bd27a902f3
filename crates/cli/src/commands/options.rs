//! Option save command.

use std::path::Path;

use freshcounter_admin::services::{ProductEditorService, SaveProductRequest};
use freshcounter_core::normalize_gid;

use super::{admin_client, print_json, read_json};

/// Save the editor state in `file` to product `product`.
pub async fn save(product: &str, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut request: SaveProductRequest = read_json(file)?;
    request.product_id = Some(normalize_gid("Product", product)?);
    request.new_product = None;

    let (client, _) = admin_client()?;
    let report = ProductEditorService::new(client)
        .save_product_options(request)
        .await?;

    tracing::info!(
        product_id = %report.product_id,
        steps = report.completed.len(),
        "Options saved"
    );
    print_json(&report)?;
    Ok(())
}
