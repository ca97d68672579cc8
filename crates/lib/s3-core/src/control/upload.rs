use std::path::PathBuf;

use bytes::Bytes;
use tracing::info;

use super::{ControlError, S3ControlPlane, ensure_key};
use crate::models::{DEFAULT_CONTENT_TYPE, UploadReceipt, content_type_for_path};
use crate::store::ObjectStore;

#[derive(Debug, Clone)]
pub struct UploadObjectRequest {
    pub key: String,
    pub content: Bytes,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    pub key: String,
    pub path: PathBuf,
    pub content_type: Option<String>,
}

impl<S: ObjectStore> S3ControlPlane<S> {
    /// Uploads inline content under `key`.
    ///
    /// The content type defaults to `application/octet-stream` when absent or
    /// empty.
    ///
    /// # Errors
    /// Returns `ControlError` if the key is empty or the upload fails.
    pub async fn upload_object(
        &self,
        request: UploadObjectRequest,
    ) -> Result<UploadReceipt, ControlError> {
        let UploadObjectRequest {
            key,
            content,
            content_type,
        } = request;
        ensure_key(&key)?;

        let content_type =
            explicit_content_type(content_type).unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        self.put(key, content, content_type).await
    }

    /// Reads the whole file at `path` into memory and uploads it under `key`.
    ///
    /// Without a non-empty content type one is guessed from the extension.
    /// Nothing is uploaded when the file cannot be read.
    ///
    /// # Errors
    /// Returns `ControlError` if the key is empty, the file cannot be read, or
    /// the upload fails.
    pub async fn upload_file(
        &self,
        request: UploadFileRequest,
    ) -> Result<UploadReceipt, ControlError> {
        let UploadFileRequest {
            key,
            path,
            content_type,
        } = request;
        ensure_key(&key)?;

        let content = tokio::fs::read(&path)
            .await
            .map_err(|source| ControlError::Io {
                path: path.clone(),
                source,
            })?;
        let content_type =
            explicit_content_type(content_type).unwrap_or_else(|| content_type_for_path(&path));
        self.put(key, Bytes::from(content), content_type).await
    }

    async fn put(
        &self,
        key: String,
        content: Bytes,
        content_type: String,
    ) -> Result<UploadReceipt, ControlError> {
        let size = content.len();
        self.store.put_object(&key, content, &content_type).await?;
        info!(key = %key, size, content_type = %content_type, "uploaded object");

        Ok(UploadReceipt {
            key,
            content_type,
            size,
        })
    }
}

fn explicit_content_type(content_type: Option<String>) -> Option<String> {
    content_type.filter(|content_type| !content_type.is_empty())
}
