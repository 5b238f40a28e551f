//! Report API client tests against a wiremock server.

use pokereports_client::{ClientError, ReportApi, ReportDirectory};
use pokereports_core::{ReportId, ReportStatus, SortDirection, sort_by_updated};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn list_unwraps_data_and_normalizes_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "reportId": 1, "status": "completed", "updated": "2024-01-01" },
                { "ReportId": 2, "Status": "pending", "Updated": "2024-02-01" }
            ]
        })))
        .mount(&server)
        .await;

    let api = ReportApi::new(server.uri());
    let reports = api.list_reports().await.unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1].status, ReportStatus::Pending);

    let view = sort_by_updated(&reports, SortDirection::Desc);
    let ids: Vec<_> = view.iter().filter_map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![ReportId::Number(2), ReportId::Number(1)]);
}

#[tokio::test]
async fn list_accepts_bare_array_and_trailing_slash_base() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/request"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "reportId": "r-1" }])),
        )
        .mount(&server)
        .await;

    let api = ReportApi::new(format!("{}/", server.uri()));
    let reports = api.list_reports().await.unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, Some(ReportId::Text("r-1".to_string())));
}

#[tokio::test]
async fn list_with_unknown_shape_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let reports = ReportApi::new(server.uri()).list_reports().await.unwrap();
    assert!(reports.is_empty());
}

#[tokio::test]
async fn list_server_error_is_remote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = ReportApi::new(server.uri()).list_reports().await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(!err.is_network());
    assert_eq!(err.to_string(), "Error: 503 - Service Unavailable");
}

#[tokio::test]
async fn list_without_server_is_network_error() {
    let err = ReportApi::new(closed_port_url()).list_reports().await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn create_posts_pokemon_type_and_returns_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/request"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "pokemon_type": "fire" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "ReportId": 7, "Status": "inserted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ReportApi::new(server.uri());
    let created = api.create_report("fire").await.unwrap();

    assert_eq!(created, serde_json::json!({ "ReportId": 7, "Status": "inserted" }));
}

#[tokio::test]
async fn create_rejected_with_500_is_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = ReportApi::new(server.uri()).create_report("water").await.unwrap_err();

    assert!(matches!(err, ClientError::Remote { status: 500, .. }));
    assert_eq!(err.to_string(), "Error: 500 - Internal Server Error");
}

#[tokio::test]
async fn delete_sends_id_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete-request"))
        .and(query_param("id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ReportApi::new(server.uri());
    let ack = api.delete_report(&ReportId::Number(42)).await.unwrap();

    assert_eq!(ack, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn delete_failure_prefers_detail_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete-request"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "detail": "Report not found" })),
        )
        .mount(&server)
        .await;

    let err = ReportApi::new(server.uri())
        .delete_report(&ReportId::from("gone"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Report not found");
}

#[tokio::test]
async fn delete_failure_with_empty_detail_uses_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete-request"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({ "detail": "" })))
        .mount(&server)
        .await;

    let err = ReportApi::new(server.uri())
        .delete_report(&ReportId::from("gone"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Error: 404 - Not Found");
}

#[tokio::test]
async fn delete_failure_without_json_falls_back_to_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/delete-request"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = ReportApi::new(server.uri())
        .delete_report(&ReportId::Number(1))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Error: 502 - Bad Gateway");
}

#[tokio::test]
async fn directory_trait_object_delegates_to_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/request"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let directory: Box<dyn ReportDirectory> = Box::new(ReportApi::new(server.uri()));
    assert!(directory.list_reports().await.unwrap().is_empty());
}
