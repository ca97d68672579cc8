use std::path::PathBuf;

use bytes::Bytes;
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
};
use s3_core::control::{UploadFileRequest, UploadObjectRequest};
use s3_core::store::ObjectStore;
use serde::{Deserialize, Serialize};

use crate::{S3Mcp, helpers};

/// Parameters for uploading inline content.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadObjectParams {
    /// Object key to write.
    pub key: String,
    /// Content to store.
    pub content: String,
    /// MIME type of the content. Defaults to application/octet-stream.
    pub content_type: Option<String>,
}

/// Parameters for uploading a local file.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileParams {
    /// Object key to write.
    pub key: String,
    /// Path of the local file to upload.
    pub filepath: String,
    /// MIME type of the file. Inferred from the extension when omitted.
    pub content_type: Option<String>,
}

impl<S: ObjectStore> S3Mcp<S> {
    pub(crate) async fn upload_object(
        &self,
        params: UploadObjectParams,
    ) -> Result<CallToolResult, ErrorData> {
        let receipt = self
            .control()
            .upload_object(UploadObjectRequest {
                key: params.key,
                content: Bytes::from(params.content),
                content_type: params.content_type,
            })
            .await
            .map_err(|err| helpers::map_err(&err))?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Successfully uploaded object \"{}\" ({} bytes, {})",
            receipt.key, receipt.size, receipt.content_type
        ))]))
    }

    pub(crate) async fn upload_file(
        &self,
        params: UploadFileParams,
    ) -> Result<CallToolResult, ErrorData> {
        let receipt = self
            .control()
            .upload_file(UploadFileRequest {
                key: params.key,
                path: PathBuf::from(&params.filepath),
                content_type: params.content_type,
            })
            .await
            .map_err(|err| helpers::map_err(&err))?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Successfully uploaded file \"{}\" as object \"{}\" ({} bytes, {})",
            params.filepath, receipt.key, receipt.size, receipt.content_type
        ))]))
    }
}
