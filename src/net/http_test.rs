use super::*;
use crate::testing::MockTransport;
use serde_json::json;

// =============================================================
// interpret_response
// =============================================================

#[test]
fn success_body_is_returned_unchanged() {
    let body = json!({"items": [{"id": 1, "nested": {"a": [1, 2, 3]}}], "total": 1});
    let response = HttpResponse::new(200, body.to_string());
    let value: Value = interpret_response(&response).unwrap();
    assert_eq!(value, body);
}

#[test]
fn created_status_counts_as_success() {
    let response = HttpResponse::new(201, r#"{"id": 7}"#);
    let value: Value = interpret_response(&response).unwrap();
    assert_eq!(value, json!({"id": 7}));
}

#[test]
fn error_field_becomes_message() {
    let response = HttpResponse::new(400, r#"{"error": "EMAIL_TAKEN"}"#);
    let err = interpret_response::<Value>(&response).unwrap_err();
    assert_eq!(err.to_string(), "EMAIL_TAKEN");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.code(), Some("EMAIL_TAKEN"));
}

#[test]
fn message_field_used_when_error_missing() {
    let response = HttpResponse::new(422, r#"{"message": "senha curta"}"#);
    let err = interpret_response::<Value>(&response).unwrap_err();
    assert_eq!(err.to_string(), "senha curta");
    assert_eq!(err.code(), None);
    assert_eq!(err.detail(), Some("senha curta"));
}

#[test]
fn error_and_message_are_both_kept() {
    let response = HttpResponse::new(403, r#"{"error": "ACCOUNT_NO_PASSWORD", "message": "Use Google"}"#);
    let err = interpret_response::<Value>(&response).unwrap_err();
    assert_eq!(err.to_string(), "ACCOUNT_NO_PASSWORD");
    assert_eq!(err.detail(), Some("Use Google"));
}

#[test]
fn unparseable_body_falls_back_to_status() {
    let response = HttpResponse::new(502, "<html>Bad Gateway</html>");
    let err = interpret_response::<Value>(&response).unwrap_err();
    assert_eq!(err.to_string(), "HTTP 502");
}

#[test]
fn empty_body_falls_back_to_status() {
    let response = HttpResponse::new(404, "");
    let err = interpret_response::<Value>(&response).unwrap_err();
    assert_eq!(err.to_string(), "HTTP 404");
}

#[test]
fn non_string_error_field_is_ignored() {
    let response = HttpResponse::new(500, r#"{"error": {"nested": true}}"#);
    let err = interpret_response::<Value>(&response).unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500");
}

#[test]
fn success_with_wrong_shape_is_decode_error() {
    #[derive(Debug, serde::Deserialize)]
    struct Needs {
        #[allow(dead_code)]
        id: i64,
    }
    let response = HttpResponse::new(200, r#"{"name": "x"}"#);
    let err = interpret_response::<Needs>(&response).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn success_with_empty_body_decodes_to_unit() {
    let response = HttpResponse::new(204, "");
    interpret_response::<()>(&response).unwrap();
}

// =============================================================
// ApiClient
// =============================================================

#[tokio::test]
async fn get_targets_api_base_with_credentials() {
    let mock = MockTransport::new();
    mock.reply(200, r#"{"ok": true}"#);
    let client = mock.client();

    let value: Value = client.get("/me").await.unwrap();

    assert_eq!(value, json!({"ok": true}));
    let request = mock.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "/api/me");
    assert!(request.with_credentials);
    assert!(request.body.is_none());
    assert!(request.headers.contains(&("Content-Type".to_owned(), "application/json".to_owned())));
}

#[tokio::test]
async fn post_serializes_json_body() {
    let mock = MockTransport::new();
    mock.reply(200, "{}");
    let client = mock.client();

    let _: Value = client.post("/auth/login", &json!({"email": "a@b.com", "password": "x"})).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::Post);
    let sent: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(sent, json!({"email": "a@b.com", "password": "x"}));
}

#[tokio::test]
async fn credentials_can_be_disabled() {
    let mock = MockTransport::new();
    mock.reply(200, "null");
    let client = mock.client();

    let _: Value = client
        .request("/public", RequestOptions { with_credentials: false, ..RequestOptions::default() })
        .await
        .unwrap();

    assert!(!mock.last_request().with_credentials);
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let mock = MockTransport::new();
    mock.reply(200, "null");
    let client = mock.client();

    let options = RequestOptions {
        headers: vec![("content-type".to_owned(), "text/plain".to_owned())],
        ..RequestOptions::default()
    };
    let _: Value = client.request("/x", options).await.unwrap();

    let headers = mock.last_request().headers;
    assert_eq!(headers, vec![("content-type".to_owned(), "text/plain".to_owned())]);
}

#[tokio::test]
async fn bearer_header_attached_only_when_token_present() {
    let mock = MockTransport::new();
    mock.reply(200, "null").reply(200, "null");
    let client = mock.client();

    let _: Value = client.with_bearer(Some("tok")).get("/calendar/events").await.unwrap();
    let _: Value = client.with_bearer(None).get("/calendar/events").await.unwrap();

    let requests = mock.requests();
    assert!(requests[0].headers.contains(&("Authorization".to_owned(), "Bearer tok".to_owned())));
    assert!(!requests[1].headers.iter().any(|(name, _)| name == "Authorization"));
}

#[tokio::test]
async fn transport_failure_is_passed_through() {
    let mock = MockTransport::new();
    mock.fail("Failed to fetch");
    let client = mock.client();

    let err = client.get::<Value>("/me").await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.to_string(), "Failed to fetch");
}

#[tokio::test]
async fn absolute_url_skips_api_base() {
    let mock = MockTransport::new();
    mock.reply(200, "null");
    let client = mock.client();

    let _: Value = client.get("https://elsewhere.example/ping").await.unwrap();
    assert_eq!(mock.last_request().url, "https://elsewhere.example/ping");
}
