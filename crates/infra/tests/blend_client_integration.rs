//! Integration tests for the Blend HTTP client against a mock server.

mod support;

use blendfeed_core::LenderApi;
use blendfeed_domain::{ApiError, ApiErrorKind, HttpSettings, TargetInstance};
use blendfeed_infra::BlendClient;
use serde_json::json;
use support::{client_for, header, json_body, settings_for, AUTHORIZATION};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn post_sends_standard_headers_and_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/home-lending/applications"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":"APP123"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = r#"{"party":{"email":"jo@example.com"}}"#.to_string();
    let response = client.post("home-lending/applications", body, None).await.unwrap();
    assert_eq!(response, r#"{"id":"APP123"}"#);

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(header(request, "content-type"), Some("application/json"));
    assert_eq!(header(request, "accept"), Some("application/json; charset=utf-8"));
    assert_eq!(header(request, "blend-api-version"), Some("5.3.0"));
    assert_eq!(header(request, "blend-target-instance"), Some("global~blue"));
    assert_eq!(header(request, "cache-control"), Some("no-cache"));
    assert_eq!(header(request, "authorization"), Some(AUTHORIZATION));
    assert_eq!(json_body(request), json!({"party": {"email": "jo@example.com"}}));
}

#[tokio::test]
async fn target_header_resolved_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(4)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.get("home-lending/applications", None).await.unwrap();

    client.set_target_instance("feed~green");
    client.get("home-lending/applications", None).await.unwrap();

    let per_call = TargetInstance::parse("acme").unwrap();
    client.get("home-lending/applications", Some(&per_call)).await.unwrap();

    client.get("home-lending/applications", None).await.unwrap();

    let targets: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| header(request, "blend-target-instance").unwrap_or_default().to_string())
        .collect();
    assert_eq!(targets, ["global~blue", "feed~green", "acme~blue", "feed~green"]);
}

#[tokio::test]
async fn non_success_status_returns_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/home-lending/applications/APP123/assignees"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message":"unknown user LO77"}"#),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .patch(
            "home-lending/applications/APP123/assignees",
            r#"{"assignees":[{"userId":"LO77"}]}"#.to_string(),
            None,
        )
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::status(422, r#"{"message":"unknown user LO77"}"#));
    assert_eq!(err.http_status(), Some(422));
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let server = MockServer::start().await;
    let mut settings = settings_for(&server);
    settings.environment = format!("http://{addr}/").into();
    let client =
        BlendClient::from_settings(&settings, &HttpSettings { timeout_seconds: 5 }).unwrap();

    let err = client.delete("home-lending/applications/APP123", None).await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert!(!err.detail().is_empty());
}

#[tokio::test]
async fn authentication_status_reads_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authentication-status"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"isAuthenticated":"true"}"#))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/authentication-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isAuthenticated": false})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.authentication_status().await.unwrap());
    assert!(!client.authentication_status().await.unwrap());
}

#[tokio::test]
async fn authentication_status_propagates_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/authentication-status"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server).authentication_status().await.unwrap_err();
    assert_eq!(err, ApiError::status(401, "Unauthorized"));
}

#[tokio::test]
async fn list_applications_returns_raw_listing() {
    let server = MockServer::start().await;
    let listing = r#"[{"id":"APP1"},{"id":"APP2"}]"#;
    Mock::given(method("GET"))
        .and(path("/home-lending/applications"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server).list_applications().await.unwrap();
    assert_eq!(body, listing);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}
