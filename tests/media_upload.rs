//! Media gateway pass-through behavior: the host sees exactly what the
//! caller sent, and the caller sees exactly what the host answered.

use serde_json::json;

use shopfront::media::{MediaError, MediaPayload, MockMediaHost, upload_media};

#[tokio::test]
async fn upload_forwards_payload_verbatim_with_auto_detection() {
    let host_result = json!({
        "public_id": "shop/products/abc123",
        "secure_url": "https://res.example.com/shop/products/abc123.png",
        "resource_type": "image",
        "bytes": 4
    });
    let host = MockMediaHost::returning(host_result.clone());
    let payload = MediaPayload::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png", "product.png");

    let outcome = upload_media(&host, &payload).await.unwrap();

    // Result comes back untouched, extra host fields included
    assert_eq!(outcome.0, host_result);
    assert_eq!(
        outcome.secure_url(),
        Some("https://res.example.com/shop/products/abc123.png")
    );

    let uploads = host.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, payload);
    assert_eq!(uploads[0].1.resource_type, "auto");
}

#[tokio::test]
async fn host_rejection_propagates_unmodified() {
    let error_body = json!({"error": {"message": "Invalid image file"}});
    let host = MockMediaHost::rejecting(error_body.clone());
    let payload = MediaPayload::new(vec![1, 2, 3], "application/pdf", "doc.pdf");

    let err = upload_media(&host, &payload).await.unwrap_err();
    match err {
        MediaError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, error_body);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn each_upload_is_independent() {
    let host = MockMediaHost::returning(json!({"ok": true}));

    let a = MediaPayload::new(b"first".to_vec(), "text/plain", "a.txt");
    let b = MediaPayload::new(b"second".to_vec(), "text/plain", "b.txt");
    upload_media(&host, &a).await.unwrap();
    upload_media(&host, &b).await.unwrap();

    let uploads = host.uploads();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0].0.bytes, b"first");
    assert_eq!(uploads[1].0.bytes, b"second");
}
