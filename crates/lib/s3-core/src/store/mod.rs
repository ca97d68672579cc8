//! Store interfaces and the S3 implementation.
//!
//! The store layer is the only place that talks to object storage. Every
//! method maps to a single service request; there is no retry or pagination
//! on top of what the SDK does internally.

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod s3;

use std::{error::Error, fmt};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::models::ObjectDescriptor;

#[cfg(any(test, feature = "test-util"))]
pub use memory::{MemoryObjectStore, RecordedUpload};
pub use s3::{S3ObjectStore, StorageSettings};

#[derive(Debug)]
pub enum StoreError {
    Request {
        operation: &'static str,
        message: String,
    },
    Body {
        key: String,
        message: String,
    },
    NotFound(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { operation, message } => write!(f, "{operation} failed: {message}"),
            Self::Body { key, message } => {
                write!(f, "failed to read body of {key}: {message}")
            }
            Self::NotFound(key) => write!(f, "NoSuchKey: the specified key does not exist: {key}"),
        }
    }
}

impl Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Response body as delivered by the service, one chunk at a time.
pub type ObjectBody = BoxStream<'static, StoreResult<Bytes>>;

/// Object storage operations used by the control plane.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Uploads `body` under `key` and waits for completion.
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> StoreResult<()>;

    /// Fetches an object. `Ok(None)` means the service answered without a body.
    async fn get_object(&self, key: &str) -> StoreResult<Option<ObjectBody>>;

    async fn delete_object(&self, key: &str) -> StoreResult<()>;

    /// Lists a single page of objects.
    async fn list_objects(
        &self,
        prefix: Option<&str>,
        max_keys: Option<i32>,
    ) -> StoreResult<Vec<ObjectDescriptor>>;
}
