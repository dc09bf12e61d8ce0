//! End-to-end tests: mock catalog endpoint through to rendered output

use packindex_cli::{OutputMode, PackIndexConfig, run};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn catalog_server(body: serde_json::Value) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/packs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

fn config_for(server: &MockServer) -> PackIndexConfig {
    let mut config = PackIndexConfig::default();
    config.source.url = format!("{}/packs", server.uri());
    config
}

#[tokio::test]
async fn test_run_prints_grouped_catalog() {
    let server = catalog_server(serde_json::json!({
        "packs": [
            {"id": 1, "genres": ["hip-hop", "pop"]},
            {"id": 2, "genres": ["pop"]}
        ]
    }))
    .await;

    let mut out = Vec::new();
    run(&config_for(&server), &OutputMode::Full { pretty: false }, &mut out)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"hip-hop\":[{\"id\":1}],\"pop\":[{\"id\":1},{\"id\":2}]}\n"
    );
}

#[tokio::test]
async fn test_run_lists_genres() {
    let server = catalog_server(serde_json::json!({
        "packs": [
            {"id": 1, "genres": ["trap"]},
            {"id": 2},
            {"id": 3, "genres": ["house", "trap"]}
        ]
    }))
    .await;

    let mut out = Vec::new();
    run(&config_for(&server), &OutputMode::Genres, &mut out)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "trap\nhouse\n");
}

#[tokio::test]
async fn test_run_malformed_catalog_prints_nothing() {
    let server = catalog_server(serde_json::json!({"results": []})).await;

    let mut out = Vec::new();
    let err = run(&config_for(&server), &OutputMode::Full { pretty: true }, &mut out)
        .await
        .unwrap_err();

    assert!(out.is_empty());
    assert!(format!("{:#}", err).contains("Malformed record"));
}

#[tokio::test]
async fn test_run_rejects_bad_url() {
    let mut config = PackIndexConfig::default();
    config.source.url = "not a url".to_string();

    let mut out = Vec::new();
    let err = run(&config, &OutputMode::Genres, &mut out).await.unwrap_err();

    assert!(err.to_string().contains("Invalid catalog URL"));
}
