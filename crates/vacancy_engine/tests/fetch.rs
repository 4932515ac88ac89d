use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vacancy_engine::{CatalogClient, ClientSettings, FailureKind, HttpCatalogClient};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bot_logging::initialize_for_tests);
}

fn client_for(server: &MockServer) -> HttpCatalogClient {
    HttpCatalogClient::new(format!("{}/api/v1/vacancies/", server.uri()), ClientSettings::default())
        .expect("client builds")
}

fn paged_body(item_count: usize, count: u32) -> serde_json::Value {
    json!({
        "results": (0..item_count)
            .map(|i| json!({"id": i, "position": format!("Job {i}")}))
            .collect::<Vec<_>>(),
        "count": count,
    })
}

#[tokio::test]
async fn paged_response_yields_inferred_page_count() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .and(query_param("page", "1"))
        .and(query_param_is_missing("query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_body(10, 35)))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page("", 1)
        .await
        .expect("fetch ok");

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_items, 35);
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.items[0].position.as_deref(), Some("Job 0"));
}

#[tokio::test]
async fn query_is_forwarded_when_non_empty() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .and(query_param("page", "2"))
        .and(query_param("query", "lecturer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_body(5, 35)))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page("lecturer", 2)
        .await
        .expect("fetch ok");

    // Beyond page 1 the size falls back to the default of 10.
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.items.len(), 5);
}

#[tokio::test]
async fn bare_array_is_a_single_page() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}, {"id": 2}, {"id": 3}])),
        )
        .mount(&server)
        .await;

    let page = client_for(&server)
        .fetch_page("", 1)
        .await
        .expect("fetch ok");

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn identical_upstream_data_yields_identical_results() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paged_body(10, 35)))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.fetch_page("", 1).await.expect("first fetch");
    let second = client.fetch_page("", 1).await.expect("second fetch");

    assert_eq!(first, second);
}

#[tokio::test]
async fn non_success_status_is_uniform_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("", 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("", 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn unknown_shape_is_failure() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("", 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::UnexpectedShape);
}

#[tokio::test]
async fn slow_response_times_out() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/vacancies/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(paged_body(1, 1)),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let client = HttpCatalogClient::new(format!("{}/api/v1/vacancies/", server.uri()), settings)
        .expect("client builds");

    let err = client.fetch_page("", 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
