//! File upload types.

use serde::{Deserialize, Serialize};

/// Where and how to POST a file before registering it with `fileCreate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedUploadTarget {
    /// URL to POST the multipart form to.
    pub url: String,
    /// URL to pass as `originalSource` once uploaded.
    pub resource_url: String,
    /// Form fields that must precede the file part.
    pub parameters: Vec<(String, String)>,
}

/// A file registered in Shopify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub status: String,
    pub alt: Option<String>,
}
