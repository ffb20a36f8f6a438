use super::client::SignatureResponse;
use super::mock::MockSignatureClient;
use super::{HttpSignatureClient, SignatureAndResolution, SignatureClient};
use std::time::Duration;

#[test]
fn test_http_client_normalizes_base_url() {
    let client = HttpSignatureClient::new("http://backend:6311/", Duration::from_secs(5)).unwrap();
    assert_eq!(client.base_url(), "http://backend:6311");
}

#[test]
fn test_http_client_from_config() {
    let config = crate::config::Config::default();
    let client = HttpSignatureClient::from_config(&config).unwrap();
    assert_eq!(client.base_url(), crate::config::DEFAULT_BACKEND_URL);
}

#[test]
fn test_response_with_signature_and_resolution() {
    let body: SignatureResponse =
        serde_json::from_str(r#"{"signature": [1, 2, 3], "resolution": 0.645}"#).unwrap();

    assert_eq!(
        body.into_result(),
        Some(SignatureAndResolution {
            signature: vec![1, 2, 3],
            resolution: 0.645,
        })
    );
}

#[test]
fn test_response_with_empty_signature_is_sentinel() {
    let body: SignatureResponse =
        serde_json::from_str(r#"{"signature": [], "resolution": 0.645}"#).unwrap();

    assert_eq!(body.into_result(), None);
}

#[test]
fn test_response_with_null_fields_is_sentinel() {
    let body: SignatureResponse =
        serde_json::from_str(r#"{"signature": null, "resolution": null}"#).unwrap();

    assert_eq!(body.into_result(), None);
}

#[test]
fn test_response_missing_resolution_is_sentinel() {
    let body: SignatureResponse =
        serde_json::from_str(r#"{"signature": [9, 9], "resolution": null}"#).unwrap();

    assert_eq!(body.into_result(), None);
}

#[tokio::test]
async fn test_mock_returns_registered_signature() {
    let client = MockSignatureClient::new();
    client.insert("/scans/a.x3p", vec![0xAA, 0xBB], 1.5).await;

    let result = client.generate("/scans/a.x3p").await.unwrap();

    assert_eq!(
        result,
        Some(SignatureAndResolution {
            signature: vec![0xAA, 0xBB],
            resolution: 1.5,
        })
    );
}

#[tokio::test]
async fn test_mock_unknown_path_is_sentinel() {
    let client = MockSignatureClient::new();

    let result = client.generate("/scans/missing.x3p").await.unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_mock_counts_invocations() {
    let client = MockSignatureClient::new();
    client.insert("/scans/a.x3p", vec![1], 1.0).await;

    client.generate("/scans/a.x3p").await.unwrap();
    client.generate("/scans/a.x3p").await.unwrap();
    client.generate("/scans/b.x3p").await.unwrap();

    assert_eq!(client.calls_for("/scans/a.x3p").await, 2);
    assert_eq!(client.calls_for("/scans/b.x3p").await, 1);
    assert_eq!(client.total_calls().await, 3);
}
