use super::*;
use crate::net::http::Method;
use crate::net::types::{Profession, ProfessionalQuery};
use crate::testing::MockTransport;
use serde_json::{Value, json};

#[test]
fn professionals_endpoint_without_filters_has_no_query() {
    assert_eq!(professionals_endpoint(&ProfessionalQuery::default()), "/professionals");
}

#[test]
fn professionals_endpoint_appends_query() {
    let query = ProfessionalQuery { profession: Some(Profession::Nutrition), ..ProfessionalQuery::default() };
    assert_eq!(professionals_endpoint(&query), "/professionals?profession=nutrition");
}

#[test]
fn professional_endpoint_formats_id() {
    assert_eq!(professional_endpoint(42), "/professionals/42");
}

#[test]
fn calendar_event_endpoint_escapes_id() {
    assert_eq!(calendar_event_endpoint("a/b"), "/calendar/events/a%2Fb");
}

#[tokio::test]
async fn login_without_body_token_yields_none() {
    let mock = MockTransport::new();
    mock.reply(200, "");
    let creds = Credentials { email: "a@b.com".to_owned(), password: "x".to_owned() };

    let response = login(&mock.client(), &creds).await.unwrap();

    assert_eq!(response.token, None);
    assert_eq!(mock.last_request().url, "/api/auth/login");
}

#[tokio::test]
async fn register_passes_through_token() {
    let mock = MockTransport::new();
    mock.reply(201, r#"{"token": "legacy"}"#);
    let creds = Credentials { email: "a@b.com".to_owned(), password: "secret1".to_owned() };

    let response = register(&mock.client(), &creds).await.unwrap();

    assert_eq!(response.token.as_deref(), Some("legacy"));
    assert_eq!(mock.last_request().url, "/api/auth/register");
}

#[tokio::test]
async fn logout_ignores_response_body() {
    let mock = MockTransport::new();
    mock.reply(200, r#"{"ok": true, "whatever": [1]}"#);

    logout(&mock.client()).await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/api/auth/logout");
}

#[tokio::test]
async fn reset_password_sends_token_and_password() {
    let mock = MockTransport::new();
    mock.reply(200, "{}");

    reset_password(&mock.client(), "tok-1", "secret1").await.unwrap();

    let sent: Value = serde_json::from_str(mock.last_request().body.as_deref().unwrap()).unwrap();
    assert_eq!(sent, json!({"token": "tok-1", "password": "secret1"}));
}

#[tokio::test]
async fn forgot_password_surfaces_backend_error() {
    let mock = MockTransport::new();
    mock.reply(429, r#"{"error": "Too many requests"}"#);

    let err = forgot_password(&mock.client(), "a@b.com").await.unwrap_err();
    assert_eq!(err.to_string(), "Too many requests");
}

#[tokio::test]
async fn request_appointment_posts_pending_status() {
    let mock = MockTransport::new();
    mock.reply(201, r#"{"id": 99}"#);
    let request = AppointmentRequest::pending(
        3,
        "2025-01-02T10:00:00-03:00".to_owned(),
        "2025-01-02T11:00:00-03:00".to_owned(),
    );

    let created = request_appointment(&mock.client(), &request).await.unwrap();

    assert_eq!(created.id, 99);
    let sent: Value = serde_json::from_str(mock.last_request().body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["status"], "pending");
    assert_eq!(sent["professional_id"], 3);
}

#[tokio::test]
async fn list_calendar_events_unwraps_items() {
    let mock = MockTransport::new();
    mock.reply(200, r#"{"items": [{"id": "e1", "summary": "A"}, {"id": "e2"}]}"#);

    let events = list_calendar_events(&mock.client()).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].summary.as_deref(), Some("A"));
}

#[tokio::test]
async fn create_calendar_event_returns_provider_event() {
    let mock = MockTransport::new();
    mock.reply(200, r#"{"id": "e9", "hangoutLink": "https://meet.google.com/q"}"#);
    let draft = CalendarEventDraft {
        title: "Sessão".to_owned(),
        description: "primeira".to_owned(),
        starts_at: "2025-01-02T10:00:00-03:00".to_owned(),
        ends_at: "2025-01-02T11:00:00-03:00".to_owned(),
        time_zone: "America/Sao_Paulo".to_owned(),
        with_meet_link: true,
    };

    let event = create_calendar_event(&mock.client(), &draft, "req-7").await.unwrap();

    assert_eq!(event.meeting_link(), Some("https://meet.google.com/q"));
    let sent: Value = serde_json::from_str(mock.last_request().body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["conferenceData"]["createRequest"]["requestId"], "req-7");
    assert_eq!(sent["description"], "primeira");
}

#[tokio::test]
async fn delete_calendar_event_uses_delete_method() {
    let mock = MockTransport::new();
    mock.reply(204, "");

    delete_calendar_event(&mock.client(), "e1").await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.url, "/api/calendar/events/e1");
}

#[tokio::test]
async fn rename_calendar_event_uses_put_with_summary() {
    let mock = MockTransport::new();
    mock.reply(200, r#"{"id": "a/b c", "summary": "Novo"}"#);

    rename_calendar_event(&mock.client(), "a/b c", "Novo").await.unwrap();

    let request = mock.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, "/api/calendar/events/a%2Fb%20c");
    let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "summary": "Novo" }));
}

#[tokio::test]
async fn calendar_status_decodes_connected() {
    let mock = MockTransport::new();
    mock.reply(200, r#"{"connected": true}"#);
    mock.reply(200, "{}");
    let client = mock.client();

    assert!(calendar_status(&client).await.unwrap().connected);
    assert!(!calendar_status(&client).await.unwrap().connected);

    let request = mock.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "/api/calendar/status");
    assert_eq!(request.body, None);
}
