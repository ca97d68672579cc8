//! MCP server implementation for s3-mcp.
//!
//! This crate exposes the object storage control plane as five MCP tools and
//! provides the stdio and streamable HTTP runners.

mod helpers;
pub mod server;
pub mod tools;

use std::sync::Arc;

use rmcp::{
    ErrorData,
    RoleServer,
    ServerHandler,
    model::{
        CallToolRequestParams,
        CallToolResult,
        JsonObject,
        ListToolsResult,
        PaginatedRequestParams,
        ServerCapabilities,
        ServerInfo,
        Tool,
    },
    service::RequestContext,
};
use s3_core::control::S3ControlPlane;
use s3_core::store::ObjectStore;
use tracing::debug;

use crate::tools::ToolCall;

const SERVER_INSTRUCTIONS: &str = r"s3-mcp exposes a single S3-compatible bucket through five tools.

- `upload_object` stores inline `content` under `key` (optional `contentType`, default application/octet-stream).
- `upload_file` reads the local file at `filepath` and stores it under `key` (optional `contentType`, inferred from the extension).
- `download_object` returns the object at `key` as UTF-8 text.
- `delete_object` removes the object at `key`; deleting a missing key succeeds.
- `list_objects` returns a JSON array of `{key, size, lastModified}` for one page of keys, optionally filtered by `prefix` and capped by `maxKeys`.

Notes:
- Downloads are buffered in memory in full; avoid very large objects.
- `list_objects` does not paginate. Narrow `prefix` to see more keys.";

/// MCP server wrapper around the object storage control plane.
pub struct S3Mcp<S: ObjectStore> {
    control: S3ControlPlane<S>,
}

impl<S: ObjectStore> Clone for S3Mcp<S> {
    fn clone(&self) -> Self {
        Self {
            control: self.control.clone(),
        }
    }
}

impl<S: ObjectStore> S3Mcp<S> {
    /// Creates a new server owning `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_store(Arc::new(store))
    }

    /// Creates a new server using a shared store handle.
    #[must_use]
    pub const fn with_store(store: Arc<S>) -> Self {
        Self {
            control: S3ControlPlane::from_arc(store),
        }
    }

    pub(crate) const fn control(&self) -> &S3ControlPlane<S> {
        &self.control
    }

    /// Returns the static tool catalog.
    #[must_use]
    pub fn tool_catalog(&self) -> Vec<Tool> {
        tools::catalog()
    }

    /// Validates the arguments for `name` and runs the matching tool.
    ///
    /// # Errors
    /// Returns `METHOD_NOT_FOUND` for unknown tools, `INVALID_PARAMS` for
    /// missing or malformed arguments, and `INTERNAL_ERROR` for storage or
    /// filesystem failures.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let call = ToolCall::parse(name, arguments)?;
        debug!(tool = call.name(), "invoking tool");
        self.dispatch(call).await
    }

    async fn dispatch(&self, call: ToolCall) -> Result<CallToolResult, ErrorData> {
        match call {
            ToolCall::UploadObject(params) => self.upload_object(params).await,
            ToolCall::UploadFile(params) => self.upload_file(params).await,
            ToolCall::DownloadObject(params) => self.download_object(params).await,
            ToolCall::DeleteObject(params) => self.delete_object(params).await,
            ToolCall::ListObjects(params) => self.list_objects(params).await,
        }
    }
}

impl<S: ObjectStore> ServerHandler for S3Mcp<S> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_catalog()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&request.name, request.arguments).await
    }
}
