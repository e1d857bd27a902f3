//! File uploads for the Admin API.
//!
//! Uploading is three calls: `stagedUploadsCreate` for a signed target, a
//! multipart POST of the bytes to that target, then `fileCreate` pointing at
//! the staged resource.

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::{
    AdminClient, AdminShopifyError, check_user_errors,
    queries::{FileCreate, StagedUploadsCreate, file_create::FileStatus},
};
use crate::shopify::types::{StagedUploadTarget, UploadedFile};

impl AdminClient {
    /// Create a staged upload target.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the request.
    #[instrument(skip(self))]
    pub async fn create_staged_upload(
        &self,
        filename: &str,
        mime_type: &str,
        file_size: usize,
    ) -> Result<StagedUploadTarget, AdminShopifyError> {
        use super::queries::staged_uploads_create::{
            StagedUploadHttpMethodType, StagedUploadInput, StagedUploadTargetGenerateUploadResource,
            Variables,
        };

        let resource = if is_image(mime_type) {
            StagedUploadTargetGenerateUploadResource::IMAGE
        } else {
            StagedUploadTargetGenerateUploadResource::FILE
        };

        let variables = Variables {
            input: vec![StagedUploadInput {
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
                resource,
                file_size: Some(file_size.to_string()),
                http_method: Some(StagedUploadHttpMethodType::POST),
            }],
        };

        let payload = self
            .execute::<StagedUploadsCreate>(variables)
            .await?
            .staged_uploads_create
            .ok_or_else(|| AdminShopifyError::missing("stagedUploadsCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        let target = payload
            .staged_targets
            .and_then(|targets| targets.into_iter().next())
            .ok_or_else(|| AdminShopifyError::missing("staged target"))?;

        Ok(StagedUploadTarget {
            url: target.url.unwrap_or_default(),
            resource_url: target.resource_url.unwrap_or_default(),
            parameters: target
                .parameters
                .into_iter()
                .map(|p| (p.name, p.value))
                .collect(),
        })
    }

    /// POST file bytes to a staged target.
    ///
    /// # Errors
    ///
    /// Returns `Status` if the upload host rejects the file.
    #[instrument(skip(self, target, bytes), fields(size = bytes.len()))]
    pub async fn upload_to_staged_target(
        &self,
        target: &StagedUploadTarget,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AdminShopifyError> {
        let mut form = Form::new();
        for (name, value) in &target.parameters {
            form = form.text(name.clone(), value.clone());
        }
        // The file part must come after the signed parameters.
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)?;
        form = form.part("file", part);

        let response = self
            .inner
            .client
            .post(&target.url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminShopifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Register an uploaded resource as a store file.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if Shopify rejects the file.
    #[instrument(skip(self))]
    pub async fn create_file(
        &self,
        resource_url: &str,
        mime_type: &str,
        alt: Option<&str>,
    ) -> Result<UploadedFile, AdminShopifyError> {
        use super::queries::file_create::{FileContentType, FileCreateInput, Variables};

        let content_type = if is_image(mime_type) {
            FileContentType::IMAGE
        } else {
            FileContentType::FILE
        };

        let variables = Variables {
            files: vec![FileCreateInput {
                original_source: resource_url.to_string(),
                content_type: Some(content_type),
                alt: alt.map(String::from),
            }],
        };

        let payload = self
            .execute::<FileCreate>(variables)
            .await?
            .file_create
            .ok_or_else(|| AdminShopifyError::missing("fileCreate payload"))?;
        check_user_errors(user_errors!(payload.user_errors))?;

        payload
            .files
            .and_then(|files| files.into_iter().next())
            .map(|f| UploadedFile {
                id: f.id,
                status: file_status_label(&f.file_status).to_string(),
                alt: f.alt,
            })
            .ok_or_else(|| AdminShopifyError::missing("file"))
    }

    /// Stage, upload and register a file in one go.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_file(
        &self,
        filename: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        alt: Option<&str>,
    ) -> Result<UploadedFile, AdminShopifyError> {
        let target = self
            .create_staged_upload(filename, mime_type, bytes.len())
            .await?;
        self.upload_to_staged_target(&target, filename, mime_type, bytes)
            .await?;
        self.create_file(&target.resource_url, mime_type, alt).await
    }
}

fn is_image(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

fn file_status_label(status: &FileStatus) -> &str {
    match status {
        FileStatus::FAILED => "FAILED",
        FileStatus::PROCESSING => "PROCESSING",
        FileStatus::READY => "READY",
        FileStatus::UPLOADED => "UPLOADED",
        FileStatus::Other(other) => other,
    }
}
