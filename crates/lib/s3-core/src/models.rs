use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Listing entry for a stored object, in the order the service returned it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescriptor {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Outcome of a completed upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

/// Guesses a content type from the extension of `path`.
///
/// Falls back to [`DEFAULT_CONTENT_TYPE`] when the extension is unknown.
pub fn content_type_for_path(path: impl AsRef<std::path::Path>) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_png_from_extension() {
        assert_eq!(content_type_for_path("/tmp/b.png"), "image/png");
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(content_type_for_path("/tmp/blob.zzunknown"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for_path("/tmp/no-extension"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let descriptor = ObjectDescriptor {
            key: "x/a.txt".to_string(),
            size: 5,
            last_modified: None,
        };
        let value = serde_json::to_value(&descriptor).expect("descriptor should serialize");
        assert_eq!(value["key"], "x/a.txt");
        assert_eq!(value["size"], 5);
        assert!(value["lastModified"].is_null());
    }
}
