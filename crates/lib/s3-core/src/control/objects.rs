use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ControlError, S3ControlPlane, ensure_key};
use crate::models::ObjectDescriptor;
use crate::store::ObjectStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListObjectsRequest {
    pub prefix: Option<String>,
    pub max_keys: Option<i32>,
}

impl<S: ObjectStore> S3ControlPlane<S> {
    /// Downloads an object and decodes it as UTF-8 text.
    ///
    /// The body is buffered in memory in full, so object size is bounded by
    /// available memory. Invalid UTF-8 sequences are replaced with U+FFFD.
    ///
    /// # Errors
    /// Returns `ControlError` if the key is empty, the object cannot be
    /// retrieved, or the response carries no body.
    pub async fn download_object(&self, key: &str) -> Result<String, ControlError> {
        ensure_key(key)?;

        let mut body = self
            .store
            .get_object(key)
            .await?
            .ok_or_else(|| ControlError::MissingBody(key.to_string()))?;

        let mut buffer = Vec::new();
        while let Some(chunk) = body.try_next().await? {
            buffer.extend_from_slice(&chunk);
        }
        debug!(key, size = buffer.len(), "downloaded object");

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Deletes an object. Missing keys are not distinguished from existing ones.
    ///
    /// # Errors
    /// Returns `ControlError` if the key is empty or the request fails.
    pub async fn delete_object(&self, key: &str) -> Result<(), ControlError> {
        ensure_key(key)?;
        self.store.delete_object(key).await?;
        info!(key, "deleted object");
        Ok(())
    }

    /// Lists a single page of objects. `max_keys` is passed through unchecked.
    ///
    /// # Errors
    /// Returns `ControlError` if the request fails.
    pub async fn list_objects(
        &self,
        request: ListObjectsRequest,
    ) -> Result<Vec<ObjectDescriptor>, ControlError> {
        let objects = self
            .store
            .list_objects(request.prefix.as_deref(), request.max_keys)
            .await?;
        debug!(
            prefix = request.prefix.as_deref().unwrap_or_default(),
            max_keys = ?request.max_keys,
            count = objects.len(),
            "listed objects"
        );
        Ok(objects)
    }
}
