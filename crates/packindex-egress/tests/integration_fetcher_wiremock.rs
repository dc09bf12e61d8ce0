//! Integration tests for the catalog fetcher using wiremock
//!
//! These tests mock the catalog endpoint to verify the fetcher's HTTP behavior.

use packindex_egress::{EgressError, HttpClientConfig, PackFetcher, fetch};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn packs_url(server: &MockServer) -> String {
    format!("{}/packs", server.uri())
}

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "packs": [
                {"id": 1, "genres": ["hip-hop", "pop"]},
                {"id": 2, "genres": ["pop"]}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = fetch(&packs_url(&mock_server)).await.unwrap();

    assert_eq!(document["packs"].as_array().unwrap().len(), 2);
    assert_eq!(document["packs"][0]["id"], 1);
}

#[tokio::test]
async fn test_fetch_and_group() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "packs": [
                {"id": 1, "genres": ["hip-hop", "pop"]},
                {"id": 2, "genres": ["pop"]},
                {"id": 3}
            ]
        })))
        .mount(&mock_server)
        .await;

    let fetcher = PackFetcher::new(&packs_url(&mock_server), &HttpClientConfig::default()).unwrap();
    let groups = fetcher.fetch_and_group().await.unwrap();

    assert_eq!(
        serde_json::to_value(&groups).unwrap(),
        serde_json::json!({"hip-hop": [{"id": 1}], "pop": [{"id": 1}, {"id": 2}]})
    );
}

#[tokio::test]
async fn test_fetch_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = fetch(&packs_url(&mock_server)).await.unwrap_err();

    assert!(matches!(err, EgressError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_invalid_utf8_body() {
    let mock_server = MockServer::start().await;

    let mut body = b"{\"packs\":[{\"id\":\"".to_vec();
    body.push(0xff);
    body.extend_from_slice(b"\",\"genres\":[\"a\"]}]}");

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&mock_server)
        .await;

    let err = fetch(&packs_url(&mock_server)).await.unwrap_err();

    assert!(matches!(err, EgressError::Parse(_)));
}

#[tokio::test]
async fn test_fetch_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = fetch(&packs_url(&mock_server)).await.unwrap_err();

    match err {
        EgressError::Status {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_and_group_missing_packs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})),
        )
        .mount(&mock_server)
        .await;

    let fetcher = PackFetcher::new(&packs_url(&mock_server), &HttpClientConfig::default()).unwrap();
    let err = fetcher.fetch_and_group().await.unwrap_err();

    assert!(matches!(
        err,
        EgressError::Core(packindex_core::Error::MalformedRecord(_))
    ));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"packs": []}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig {
        timeout_secs: 1,
        ..Default::default()
    };
    let fetcher = PackFetcher::new(&packs_url(&mock_server), &config).unwrap();
    let err = fetcher.fetch().await.unwrap_err();

    assert!(err.is_network());
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind then release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/packs", port);

    let err = fetch(&url).await.unwrap_err();

    assert!(err.is_network());
}
