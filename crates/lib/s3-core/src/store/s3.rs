use std::{fmt, ops::Range};

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tracing::warn;

use super::{ObjectBody, ObjectStore, StoreError, StoreResult};
use crate::models::ObjectDescriptor;

/// Bodies larger than this are sent as a multipart upload.
pub const MULTIPART_THRESHOLD: usize = 8 * 1024 * 1024;
pub const PART_SIZE: usize = 8 * 1024 * 1024;

const CREDENTIALS_PROVIDER: &str = "s3-mcp-static";

/// Connection settings for an S3-compatible service.
#[derive(Clone)]
pub struct StorageSettings {
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub force_path_style: bool,
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("access_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

/// [`ObjectStore`] backed by `aws-sdk-s3`, scoped to a single bucket.
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Builds an SDK client with static credentials and a custom endpoint.
    pub async fn connect(settings: StorageSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key,
            settings.secret_key,
            None,
            None,
            CREDENTIALS_PROVIDER,
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region))
            .endpoint_url(settings.endpoint)
            .credentials_provider(credentials)
            .load()
            .await;
        let config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        Self::from_client(Client::from_conf(config), settings.bucket)
    }

    #[must_use]
    pub const fn from_client(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_single(&self, key: &str, body: Bytes, content_type: &str) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| request_error("PutObject", err))?;
        Ok(())
    }

    async fn put_multipart(&self, key: &str, body: Bytes, content_type: &str) -> StoreResult<()> {
        let created = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| request_error("CreateMultipartUpload", err))?;
        let upload_id = created
            .upload_id()
            .ok_or_else(|| StoreError::Request {
                operation: "CreateMultipartUpload",
                message: "response did not include an upload id".to_string(),
            })?
            .to_string();

        let result = match self.upload_parts(key, &upload_id, &body).await {
            Ok(parts) => self.complete_multipart(key, &upload_id, parts).await,
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.abort_multipart(key, &upload_id).await;
        }
        result
    }

    async fn upload_parts(
        &self,
        key: &str,
        upload_id: &str,
        body: &Bytes,
    ) -> StoreResult<Vec<CompletedPart>> {
        let ranges = part_ranges(body.len(), PART_SIZE);
        let mut parts = Vec::with_capacity(ranges.len());
        for (part_number, range) in (1_i32..).zip(ranges) {
            let uploaded = self
                .client
                .upload_part()
                .bucket(&self.bucket)
                .key(key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(ByteStream::from(body.slice(range)))
                .send()
                .await
                .map_err(|err| request_error("UploadPart", err))?;
            parts.push(
                CompletedPart::builder()
                    .set_e_tag(uploaded.e_tag().map(str::to_string))
                    .part_number(part_number)
                    .build(),
            );
        }
        Ok(parts)
    }

    async fn complete_multipart(
        &self,
        key: &str,
        upload_id: &str,
        parts: Vec<CompletedPart>,
    ) -> StoreResult<()> {
        self.client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(parts))
                    .build(),
            )
            .send()
            .await
            .map_err(|err| request_error("CompleteMultipartUpload", err))?;
        Ok(())
    }

    async fn abort_multipart(&self, key: &str, upload_id: &str) {
        let aborted = self
            .client
            .abort_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .send()
            .await;
        if let Err(err) = aborted {
            warn!(
                key,
                upload_id,
                error = %DisplayErrorContext(&err),
                "failed to abort multipart upload"
            );
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> StoreResult<()> {
        if body.len() > MULTIPART_THRESHOLD {
            self.put_multipart(key, body, content_type).await
        } else {
            self.put_single(key, body, content_type).await
        }
    }

    async fn get_object(&self, key: &str) -> StoreResult<Option<ObjectBody>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| request_error("GetObject", err))?;

        let chunks = futures::stream::unfold(
            (output.body, key.to_string()),
            |(mut body, key)| async move {
                match body.next().await? {
                    Ok(chunk) => Some((Ok(chunk), (body, key))),
                    Err(err) => {
                        let error = StoreError::Body {
                            key: key.clone(),
                            message: err.to_string(),
                        };
                        Some((Err(error), (body, key)))
                    }
                }
            },
        );
        Ok(Some(chunks.boxed()))
    }

    async fn delete_object(&self, key: &str) -> StoreResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| request_error("DeleteObject", err))?;
        Ok(())
    }

    async fn list_objects(
        &self,
        prefix: Option<&str>,
        max_keys: Option<i32>,
    ) -> StoreResult<Vec<ObjectDescriptor>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(prefix.map(str::to_string))
            .set_max_keys(max_keys)
            .send()
            .await
            .map_err(|err| request_error("ListObjectsV2", err))?;

        Ok(output
            .contents()
            .iter()
            .map(|object| ObjectDescriptor {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or(0),
                last_modified: object.last_modified().and_then(|modified| {
                    DateTime::<Utc>::from_timestamp(modified.secs(), modified.subsec_nanos())
                }),
            })
            .collect())
    }
}

fn request_error(operation: &'static str, err: impl std::error::Error) -> StoreError {
    StoreError::Request {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}

/// Splits `len` bytes into consecutive ranges of at most `part_size` bytes.
fn part_ranges(len: usize, part_size: usize) -> Vec<Range<usize>> {
    (0..len)
        .step_by(part_size.max(1))
        .map(|start| start..(start + part_size).min(len))
        .collect()
}
