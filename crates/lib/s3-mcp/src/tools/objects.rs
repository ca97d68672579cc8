use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
};
use s3_core::control::ListObjectsRequest;
use s3_core::store::ObjectStore;
use serde::{Deserialize, Serialize};

use crate::{S3Mcp, helpers};

/// Parameters for downloading an object.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DownloadObjectParams {
    /// Object key to read.
    pub key: String,
}

/// Parameters for deleting an object.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeleteObjectParams {
    /// Object key to delete.
    pub key: String,
}

/// Parameters for listing objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsParams {
    /// Only return keys starting with this prefix.
    pub prefix: Option<String>,
    /// Maximum number of keys to return. Defaults to the service page size.
    pub max_keys: Option<i32>,
}

impl<S: ObjectStore> S3Mcp<S> {
    pub(crate) async fn download_object(
        &self,
        params: DownloadObjectParams,
    ) -> Result<CallToolResult, ErrorData> {
        let text = self
            .control()
            .download_object(&params.key)
            .await
            .map_err(|err| helpers::map_err(&err))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub(crate) async fn delete_object(
        &self,
        params: DeleteObjectParams,
    ) -> Result<CallToolResult, ErrorData> {
        self.control()
            .delete_object(&params.key)
            .await
            .map_err(|err| helpers::map_err(&err))?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Successfully deleted object \"{}\"",
            params.key
        ))]))
    }

    pub(crate) async fn list_objects(
        &self,
        params: ListObjectsParams,
    ) -> Result<CallToolResult, ErrorData> {
        let objects = self
            .control()
            .list_objects(ListObjectsRequest {
                prefix: params.prefix,
                max_keys: params.max_keys,
            })
            .await
            .map_err(|err| helpers::map_err(&err))?;
        let listing = serde_json::to_string_pretty(&objects).map_err(|err| {
            helpers::mcp_err(
                rmcp::model::ErrorCode::INTERNAL_ERROR,
                format!("failed to serialize object listing: {err}"),
            )
        })?;
        Ok(CallToolResult::success(vec![Content::text(listing)]))
    }
}
