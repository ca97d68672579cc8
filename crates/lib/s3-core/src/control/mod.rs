use std::{error::Error, fmt, path::PathBuf, sync::Arc};

use crate::store::{ObjectStore, StoreError};

pub mod objects;
pub mod upload;

pub use objects::ListObjectsRequest;
pub use upload::{UploadFileRequest, UploadObjectRequest};

#[derive(Debug)]
pub enum ControlError {
    Store(StoreError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingBody(String),
    InvalidInput(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "failed to read file {}: {source}", path.display())
            }
            Self::MissingBody(key) => write!(f, "object {key} has no body"),
            Self::InvalidInput(message) => write!(f, "Invalid input: {message}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::MissingBody(_) | Self::InvalidInput(_) => None,
        }
    }
}

impl From<StoreError> for ControlError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Operations exposed to tool handlers, one storage call each.
pub struct S3ControlPlane<S: ObjectStore> {
    store: Arc<S>,
}

impl<S: ObjectStore> Clone for S3ControlPlane<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: ObjectStore> S3ControlPlane<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub const fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn ensure_key(key: &str) -> Result<(), ControlError> {
    if key.is_empty() {
        return Err(ControlError::InvalidInput("key is required".to_string()));
    }
    Ok(())
}
