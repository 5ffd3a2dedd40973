use parallel_async::types::extract::ExtractRequest;
use parallel_async::{Client, ParallelConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<ParallelConfig> {
    let config = ParallelConfig::new()
        .with_api_base(server.uri())
        .with_api_key("test-api-key");
    Client::with_config(config).unwrap()
}

#[tokio::test]
async fn extract_success_parses_results_and_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/extract"))
        .and(body_json(serde_json::json!({
            "urls": ["https://example.com/ok", "https://example.com/missing"],
            "objective": "pricing",
            "excerpts": true,
            "full_content": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "extract_id": "extract_1",
            "results": [
                {
                    "url": "https://example.com/ok",
                    "title": "OK Page",
                    "publish_date": null,
                    "excerpts": ["plan costs $10"],
                    "full_content": null
                }
            ],
            "errors": [
                {
                    "url": "https://example.com/missing",
                    "error_type": "fetch_error",
                    "http_status_code": 404,
                    "content": "Not Found"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = ExtractRequest::new(vec![
        "https://example.com/ok".into(),
        "https://example.com/missing".into(),
    ])
    .with_objective("pricing");
    let resp = client.extract().create(&req).await.unwrap();

    assert_eq!(resp.extract_id.as_deref(), Some("extract_1"));
    assert_eq!(resp.results.len(), 1);
    assert_eq!(resp.results[0].title.as_deref(), Some("OK Page"));
    assert_eq!(
        resp.results[0].excerpts.as_deref(),
        Some(&["plan costs $10".to_string()][..])
    );
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(resp.errors[0].http_status_code, Some(404));
    assert_eq!(resp.errors[0].error_type.as_deref(), Some("fetch_error"));
}

#[tokio::test]
async fn extract_forbidden_is_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "message": "Key lacks extract access"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .extract()
        .create(&ExtractRequest::new(vec!["https://example.com".into()]))
        .await
        .unwrap_err();

    assert!(err.is_auth_failure());
    assert!(err.to_string().contains("Key lacks extract access"));
}
