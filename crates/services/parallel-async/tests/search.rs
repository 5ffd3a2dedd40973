use parallel_async::config::ENV_API_KEY;
use parallel_async::test_support::EnvGuard;
use parallel_async::types::search::{SearchEntry, SearchRequest};
use parallel_async::{Client, ParallelConfig, ParallelError};
use serial_test::serial;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<ParallelConfig> {
    let config = ParallelConfig::new()
        .with_api_base(server.uri())
        .with_api_key("test-api-key");
    Client::with_config(config).unwrap()
}

fn mock_search_response() -> serde_json::Value {
    serde_json::json!({
        "search_id": "search_abc",
        "results": [
            {
                "url": "https://example.com/page1",
                "title": "Example Page",
                "publish_date": "2025-01-15",
                "excerpts": ["first passage", "second passage"]
            }
        ]
    })
}

#[tokio::test]
async fn search_success_parses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "test-api-key"))
        .and(header("parallel-beta", "search-extract-2025-10-10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_search_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new(vec!["example".into()]).with_max_results(10);
    let resp = client.search().create(&req).await.unwrap();

    assert_eq!(resp.search_id.as_deref(), Some("search_abc"));
    assert_eq!(resp.results.len(), 1);
    let SearchEntry::Page(page) = &resp.results[0] else {
        panic!("expected a flat page entry");
    };
    assert_eq!(page.url.as_deref(), Some("https://example.com/page1"));
    assert_eq!(page.title.as_deref(), Some("Example Page"));
    assert_eq!(page.publish_date.as_deref(), Some("2025-01-15"));
    assert_eq!(page.passages(), vec!["first passage", "second passage"]);
}

#[tokio::test]
async fn search_request_body_matches_wire_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(serde_json::json!({
            "objective": "find docs",
            "search_queries": ["a", "b"],
            "max_results": 3,
            "excerpts": { "max_chars_per_result": 500 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SearchRequest::new(vec!["a".into(), "b".into()])
        .with_objective("find docs")
        .with_max_results(3)
        .with_max_chars_per_result(500);

    let resp = client.search().create(&req).await.unwrap();
    assert!(resp.results.is_empty());
}

#[tokio::test]
#[serial(env)]
async fn missing_api_key_is_config_error_without_request() {
    let _guard = EnvGuard::remove(ENV_API_KEY);
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        Client::with_config(ParallelConfig::new().with_api_base(server.uri())).unwrap();

    let result = client
        .search()
        .create(&SearchRequest::new(vec!["test".into()]))
        .await;

    match result.unwrap_err() {
        ParallelError::Config(msg) => assert!(msg.contains(ENV_API_KEY)),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_auth_failure_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Invalid API key", "type": "authentication_error" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server).with_backoff(
        backon::ExponentialBuilder::default()
            .with_min_delay(std::time::Duration::from_millis(10))
            .with_max_times(3),
    );

    let err = client
        .search()
        .create(&SearchRequest::new(vec!["test".into()]))
        .await
        .unwrap_err();

    assert!(err.is_auth_failure());
    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("Invalid API key"));
}

#[tokio::test]
async fn error_500_plain_text_parsed_without_retry_by_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client
        .search()
        .create(&SearchRequest::new(vec!["test".into()]))
        .await;

    match result.unwrap_err() {
        ParallelError::Api(obj) => {
            assert_eq!(obj.status_code, Some(500));
            assert_eq!(obj.message, "Internal Server Error");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_serde_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search()
        .create(&SearchRequest::new(vec!["test".into()]))
        .await
        .unwrap_err();

    match err {
        ParallelError::Serde(msg) => assert!(msg.contains("not json")),
        other => panic!("Expected Serde error, got {other:?}"),
    }
}

#[tokio::test]
async fn group_with_malformed_results_is_serde_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{ "query": "rust", "results": [{ "url": 42 }] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .search()
        .create(&SearchRequest::new(vec!["rust".into(), "tokio".into()]))
        .await
        .unwrap_err();

    match err {
        ParallelError::Serde(msg) => assert!(msg.contains("invalid type"), "{msg}"),
        other => panic!("Expected Serde error, got {other:?}"),
    }
}
