use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;

use super::{ObjectBody, ObjectStore, StoreError, StoreResult};
use crate::models::ObjectDescriptor;

const SERVICE_MAX_KEYS: i32 = 1000;

/// Upload observed by [`MemoryObjectStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub key: String,
    pub body: Bytes,
    pub content_type: String,
}

/// Arguments of the most recent list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedList {
    pub prefix: Option<String>,
    pub max_keys: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub put: usize,
    pub get: usize,
    pub delete: usize,
    pub list: usize,
}

impl CallCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.put + self.get + self.delete + self.list
    }
}

struct StoredObject {
    chunks: Option<Vec<Bytes>>,
    last_modified: DateTime<Utc>,
}

impl StoredObject {
    fn size(&self) -> i64 {
        let len: usize = self
            .chunks
            .iter()
            .flatten()
            .map(Bytes::len)
            .sum();
        i64::try_from(len).unwrap_or(i64::MAX)
    }
}

#[derive(Default)]
struct MemoryState {
    objects: BTreeMap<String, StoredObject>,
    uploads: Vec<RecordedUpload>,
    calls: CallCounts,
    last_list: Option<RecordedList>,
    failure: Option<String>,
}

/// In-memory [`ObjectStore`] that records every call.
///
/// Behaves like a single-bucket S3 service: deletes of missing keys succeed,
/// gets of missing keys fail, and listings are one page of at most
/// `max_keys` (default 1000) keys in lexicographic order.
#[derive(Default)]
pub struct MemoryObjectStore {
    state: Mutex<MemoryState>,
}

impl MemoryObjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds an object with a single body chunk.
    pub fn insert(&self, key: impl Into<String>, body: impl Into<Bytes>) {
        self.insert_chunks(key, vec![body.into()]);
    }

    /// Seeds an object whose body is delivered as the given chunks.
    pub fn insert_chunks(&self, key: impl Into<String>, chunks: Vec<Bytes>) {
        self.state().objects.insert(
            key.into(),
            StoredObject {
                chunks: Some(chunks),
                last_modified: Utc::now(),
            },
        );
    }

    /// Seeds an object that the service reports without a body.
    pub fn insert_without_body(&self, key: impl Into<String>) {
        self.state().objects.insert(
            key.into(),
            StoredObject {
                chunks: None,
                last_modified: Utc::now(),
            },
        );
    }

    /// Makes every subsequent call fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.state().failure = Some(message.into());
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.state().objects.contains_key(key)
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.state().calls
    }

    #[must_use]
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.state().uploads.clone()
    }

    #[must_use]
    pub fn last_list(&self) -> Option<RecordedList> {
        self.state().last_list.clone()
    }
}

fn check_failure(state: &MemoryState, operation: &'static str) -> StoreResult<()> {
    state.failure.as_ref().map_or(Ok(()), |message| {
        Err(StoreError::Request {
            operation,
            message: message.clone(),
        })
    })
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> StoreResult<()> {
        let mut state = self.state();
        state.calls.put += 1;
        check_failure(&state, "PutObject")?;

        state.uploads.push(RecordedUpload {
            key: key.to_string(),
            body: body.clone(),
            content_type: content_type.to_string(),
        });
        state.objects.insert(
            key.to_string(),
            StoredObject {
                chunks: Some(vec![body]),
                last_modified: Utc::now(),
            },
        );
        drop(state);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StoreResult<Option<ObjectBody>> {
        let mut state = self.state();
        state.calls.get += 1;
        check_failure(&state, "GetObject")?;

        let chunks = state
            .objects
            .get(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?
            .chunks
            .clone();
        drop(state);

        Ok(chunks.map(|chunks| {
            futures::stream::iter(chunks.into_iter().map(Ok::<Bytes, StoreError>)).boxed()
        }))
    }

    async fn delete_object(&self, key: &str) -> StoreResult<()> {
        let mut state = self.state();
        state.calls.delete += 1;
        check_failure(&state, "DeleteObject")?;

        state.objects.remove(key);
        drop(state);
        Ok(())
    }

    async fn list_objects(
        &self,
        prefix: Option<&str>,
        max_keys: Option<i32>,
    ) -> StoreResult<Vec<ObjectDescriptor>> {
        let mut state = self.state();
        state.calls.list += 1;
        state.last_list = Some(RecordedList {
            prefix: prefix.map(str::to_string),
            max_keys,
        });
        check_failure(&state, "ListObjectsV2")?;

        let page_size = max_keys.unwrap_or(SERVICE_MAX_KEYS);
        if page_size < 0 {
            return Err(StoreError::Request {
                operation: "ListObjectsV2",
                message: format!("InvalidArgument: max-keys must be non-negative, got {page_size}"),
            });
        }
        let page_size = usize::try_from(page_size.min(SERVICE_MAX_KEYS)).unwrap_or_default();

        Ok(state
            .objects
            .iter()
            .filter(|(key, _)| prefix.is_none_or(|prefix| key.starts_with(prefix)))
            .take(page_size)
            .map(|(key, object)| ObjectDescriptor {
                key: key.clone(),
                size: object.size(),
                last_modified: Some(object.last_modified),
            })
            .collect())
    }
}
