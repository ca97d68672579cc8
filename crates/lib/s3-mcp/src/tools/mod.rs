//! MCP tool catalog and argument parsing.
//!
//! Incoming invocations are decoded into a [`ToolCall`] before any handler
//! runs, so missing or malformed arguments never reach object storage.

pub mod objects;
pub mod upload;

use std::sync::Arc;

use rmcp::{
    ErrorData,
    model::{ErrorCode, JsonObject, Tool},
    schemars,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::helpers;

pub use objects::{DeleteObjectParams, DownloadObjectParams, ListObjectsParams};
pub use upload::{UploadFileParams, UploadObjectParams};

pub const UPLOAD_OBJECT: &str = "upload_object";
pub const UPLOAD_FILE: &str = "upload_file";
pub const DOWNLOAD_OBJECT: &str = "download_object";
pub const DELETE_OBJECT: &str = "delete_object";
pub const LIST_OBJECTS: &str = "list_objects";

/// A validated tool invocation.
#[derive(Debug, Clone)]
pub enum ToolCall {
    UploadObject(UploadObjectParams),
    UploadFile(UploadFileParams),
    DownloadObject(DownloadObjectParams),
    DeleteObject(DeleteObjectParams),
    ListObjects(ListObjectsParams),
}

impl ToolCall {
    /// Decodes and validates the arguments for tool `name`.
    ///
    /// # Errors
    /// Returns `METHOD_NOT_FOUND` for an unknown tool and `INVALID_PARAMS` when
    /// a required argument is missing, empty, or of the wrong type.
    pub fn parse(name: &str, arguments: Option<JsonObject>) -> Result<Self, ErrorData> {
        let arguments = Value::Object(arguments.unwrap_or_default());
        let call = match name {
            UPLOAD_OBJECT => Self::UploadObject(decode(name, arguments)?),
            UPLOAD_FILE => Self::UploadFile(decode(name, arguments)?),
            DOWNLOAD_OBJECT => Self::DownloadObject(decode(name, arguments)?),
            DELETE_OBJECT => Self::DeleteObject(decode(name, arguments)?),
            LIST_OBJECTS => Self::ListObjects(decode(name, arguments)?),
            _ => {
                return Err(helpers::mcp_err(
                    ErrorCode::METHOD_NOT_FOUND,
                    format!("Unknown tool: {name}"),
                ));
            }
        };
        call.validate()?;
        Ok(call)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UploadObject(_) => UPLOAD_OBJECT,
            Self::UploadFile(_) => UPLOAD_FILE,
            Self::DownloadObject(_) => DOWNLOAD_OBJECT,
            Self::DeleteObject(_) => DELETE_OBJECT,
            Self::ListObjects(_) => LIST_OBJECTS,
        }
    }

    fn validate(&self) -> Result<(), ErrorData> {
        match self {
            Self::UploadObject(params) => {
                require_text("key", &params.key)?;
                if params.content.is_empty() {
                    return Err(missing("content"));
                }
                Ok(())
            }
            Self::UploadFile(params) => {
                require_text("key", &params.key)?;
                require_text("filepath", &params.filepath)
            }
            Self::DownloadObject(DownloadObjectParams { key })
            | Self::DeleteObject(DeleteObjectParams { key }) => require_text("key", key),
            Self::ListObjects(_) => Ok(()),
        }
    }
}

/// Static catalog of the tools this server exposes.
#[must_use]
pub fn catalog() -> Vec<Tool> {
    vec![
        tool::<UploadObjectParams>(
            UPLOAD_OBJECT,
            "Upload content to the bucket under the given key. contentType defaults to application/octet-stream.",
        ),
        tool::<UploadFileParams>(
            UPLOAD_FILE,
            "Upload a local file to the bucket under the given key. contentType is inferred from the file extension when omitted.",
        ),
        tool::<DownloadObjectParams>(
            DOWNLOAD_OBJECT,
            "Download an object from the bucket and return its content as UTF-8 text.",
        ),
        tool::<DeleteObjectParams>(
            DELETE_OBJECT,
            "Delete an object from the bucket.",
        ),
        tool::<ListObjectsParams>(
            LIST_OBJECTS,
            "List objects in the bucket, optionally filtered by prefix. Returns a single page of at most maxKeys objects.",
        ),
    ]
}

fn tool<T: schemars::JsonSchema>(name: &'static str, description: &'static str) -> Tool {
    Tool::new(name, description, input_schema::<T>())
}

fn input_schema<T: schemars::JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(object)) => Arc::new(object),
        _ => Arc::new(JsonObject::new()),
    }
}

fn decode<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ErrorData> {
    serde_json::from_value(arguments).map_err(|err| {
        helpers::mcp_err(
            ErrorCode::INVALID_PARAMS,
            format!("invalid arguments for {tool}: {err}"),
        )
    })
}

fn require_text(field: &'static str, value: &str) -> Result<(), ErrorData> {
    if value.is_empty() {
        return Err(missing(field));
    }
    Ok(())
}

fn missing(field: &'static str) -> ErrorData {
    helpers::mcp_err(ErrorCode::INVALID_PARAMS, format!("{field} is required"))
}
