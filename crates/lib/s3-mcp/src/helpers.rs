use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use s3_core::control::ControlError;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps control plane failures onto MCP error codes, keeping the message verbatim.
pub fn map_err(err: &ControlError) -> ErrorData {
    let code = match err {
        ControlError::InvalidInput(_) => ErrorCode::INVALID_PARAMS,
        ControlError::Store(_) | ControlError::Io { .. } | ControlError::MissingBody(_) => {
            ErrorCode::INTERNAL_ERROR
        }
    };
    mcp_err(code, err.to_string())
}
