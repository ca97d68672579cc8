use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use s3_core::control::{
    ControlError,
    ListObjectsRequest,
    S3ControlPlane,
    UploadFileRequest,
    UploadObjectRequest,
};
use s3_core::store::MemoryObjectStore;

fn build_control_plane() -> (S3ControlPlane<MemoryObjectStore>, Arc<MemoryObjectStore>) {
    let store = Arc::new(MemoryObjectStore::new());
    (S3ControlPlane::from_arc(store.clone()), store)
}

fn temp_file(extension: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("s3-core-{}.{extension}", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents)
        .unwrap_or_else(|err| panic!("failed to write temp file {}: {err}", path.display()));
    path
}

#[tokio::test]
async fn upload_then_download_roundtrip() {
    let (control, store) = build_control_plane();

    let receipt = control
        .upload_object(UploadObjectRequest {
            key: "notes/a.txt".to_string(),
            content: Bytes::from_static(b"hello"),
            content_type: Some("text/plain".to_string()),
        })
        .await
        .expect("upload should succeed");
    assert_eq!(receipt.key, "notes/a.txt");
    assert_eq!(receipt.size, 5);
    assert_eq!(receipt.content_type, "text/plain");

    let text = control
        .download_object("notes/a.txt")
        .await
        .expect("download should succeed");
    assert_eq!(text, "hello");
    assert_eq!(store.calls().put, 1);
    assert_eq!(store.calls().get, 1);
}

#[tokio::test]
async fn upload_file_reads_contents_and_guesses_type() {
    let (control, store) = build_control_plane();
    let path = temp_file("json", br#"{"ok":true}"#);

    let receipt = control
        .upload_file(UploadFileRequest {
            key: "data/config.json".to_string(),
            path: path.clone(),
            content_type: None,
        })
        .await
        .expect("upload should succeed");
    let _ = std::fs::remove_file(&path);

    assert_eq!(receipt.content_type, "application/json");
    let uploads = store.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].body, Bytes::from_static(br#"{"ok":true}"#));
}

#[tokio::test]
async fn upload_file_explicit_content_type_wins() {
    let (control, store) = build_control_plane();
    let path = temp_file("png", b"not really a png");

    control
        .upload_file(UploadFileRequest {
            key: "b.png".to_string(),
            path: path.clone(),
            content_type: Some("application/x-custom".to_string()),
        })
        .await
        .expect("upload should succeed");
    let _ = std::fs::remove_file(&path);

    assert_eq!(store.uploads()[0].content_type, "application/x-custom");
}

#[tokio::test]
async fn upload_file_empty_content_type_is_inferred() {
    let (control, store) = build_control_plane();
    let path = temp_file("png", b"\x89PNG");

    control
        .upload_file(UploadFileRequest {
            key: "b.png".to_string(),
            path: path.clone(),
            content_type: Some(String::new()),
        })
        .await
        .expect("upload should succeed");
    let _ = std::fs::remove_file(&path);

    assert_eq!(store.uploads()[0].content_type, "image/png");
}

#[tokio::test]
async fn missing_file_is_io_error_without_upload() {
    let (control, store) = build_control_plane();
    let path = std::env::temp_dir().join(format!("s3-core-missing-{}.png", uuid::Uuid::new_v4()));

    let err = control
        .upload_file(UploadFileRequest {
            key: "b.png".to_string(),
            path,
            content_type: None,
        })
        .await
        .expect_err("missing file should fail");

    assert!(matches!(err, ControlError::Io { .. }));
    assert_eq!(store.calls().total(), 0);
}

#[tokio::test]
async fn download_without_body_is_error() {
    let (control, store) = build_control_plane();
    store.insert_without_body("empty");

    let err = control
        .download_object("empty")
        .await
        .expect_err("missing body should fail");
    assert!(matches!(err, ControlError::MissingBody(ref key) if key == "empty"));
}

#[tokio::test]
async fn download_missing_object_surfaces_store_error() {
    let (control, _store) = build_control_plane();

    let err = control
        .download_object("nope.txt")
        .await
        .expect_err("missing object should fail");
    assert!(matches!(err, ControlError::Store(_)));
    assert!(err.to_string().contains("nope.txt"));
}

#[tokio::test]
async fn download_replaces_invalid_utf8() {
    let (control, store) = build_control_plane();
    store.insert_chunks("bin", vec![Bytes::from_static(b"ok"), Bytes::from_static(&[0xff])]);

    let text = control.download_object("bin").await.expect("download should succeed");
    assert_eq!(text, "ok\u{fffd}");
}

#[tokio::test]
async fn empty_key_rejected_before_store_call() {
    let (control, store) = build_control_plane();

    let err = control
        .delete_object("")
        .await
        .expect_err("empty key should fail");
    assert!(matches!(err, ControlError::InvalidInput(_)));
    assert_eq!(store.calls().total(), 0);
}

#[tokio::test]
async fn list_preserves_service_order_and_prefix() {
    let (control, store) = build_control_plane();
    store.insert("x/b", "bb");
    store.insert("x/a", "a");
    store.insert("y/c", "ccc");

    let objects = control
        .list_objects(ListObjectsRequest {
            prefix: Some("x/".to_string()),
            max_keys: None,
        })
        .await
        .expect("list should succeed");

    let keys: Vec<&str> = objects.iter().map(|object| object.key.as_str()).collect();
    assert_eq!(keys, vec!["x/a", "x/b"]);
    assert_eq!(objects[1].size, 2);
    assert!(objects.iter().all(|object| object.last_modified.is_some()));
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (control, store) = build_control_plane();
    store.insert("gone.txt", "x");

    control.delete_object("gone.txt").await.expect("first delete should succeed");
    control.delete_object("gone.txt").await.expect("second delete should succeed");

    assert!(!store.contains("gone.txt"));
    assert_eq!(store.calls().delete, 2);
}
