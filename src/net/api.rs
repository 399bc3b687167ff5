//! Typed helpers for each backend endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call these instead of building paths by hand. Every helper is
//! generic over the [`Transport`] so the same code runs against `fetch` in
//! the browser and a scripted mock in tests.
//!
//! ERROR HANDLING
//! ==============
//! Failures are returned as [`ApiError`]; pages render `to_string()` directly.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::IgnoredAny;

use super::http::{ApiClient, ApiError, Transport};
use super::types::{
    AppointmentCreated, AppointmentRequest, AuthResponse, CalendarEvent, CalendarEventDraft, CalendarEventList,
    CalendarStatus, Credentials, ForgotPasswordRequest, MeResponse, ProfessionalDetail, ProfessionalList,
    ProfessionalQuery, RenameEventRequest, ResetPasswordRequest,
};

fn professionals_endpoint(query: &ProfessionalQuery) -> String {
    let qs = query.to_query_string();
    if qs.is_empty() { "/professionals".to_owned() } else { format!("/professionals?{qs}") }
}

fn professional_endpoint(id: i64) -> String {
    format!("/professionals/{id}")
}

fn calendar_event_endpoint(id: &str) -> String {
    format!("/calendar/events/{}", urlencoding::encode(id))
}

/// `GET /me` with the ambient cookie.
///
/// # Errors
///
/// Any [`ApiError`]; the session store treats all of them as signed out.
pub async fn fetch_me<T: Transport>(client: &ApiClient<T>) -> Result<MeResponse, ApiError> {
    client.get("/me").await
}

/// `POST /auth/login`.
///
/// # Errors
///
/// [`ApiError::Status`] carries the backend's `error` code (e.g. `ACCOUNT_NO_PASSWORD`).
pub async fn login<T: Transport>(client: &ApiClient<T>, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
    let body: Option<AuthResponse> = client.post("/auth/login", credentials).await?;
    Ok(body.unwrap_or_default())
}

/// `POST /auth/register`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn register<T: Transport>(client: &ApiClient<T>, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
    let body: Option<AuthResponse> = client.post("/auth/register", credentials).await?;
    Ok(body.unwrap_or_default())
}

/// `POST /auth/logout`. The response body is ignored.
///
/// # Errors
///
/// Any [`ApiError`]; callers are expected to ignore it.
pub async fn logout<T: Transport>(client: &ApiClient<T>) -> Result<(), ApiError> {
    let _: IgnoredAny = client.post("/auth/logout", &serde_json::json!({})).await?;
    Ok(())
}

/// `POST /auth/forgot-password`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn forgot_password<T: Transport>(client: &ApiClient<T>, email: &str) -> Result<(), ApiError> {
    let body = ForgotPasswordRequest { email: email.to_owned() };
    let _: IgnoredAny = client.post("/auth/forgot-password", &body).await?;
    Ok(())
}

/// `POST /auth/reset-password`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn reset_password<T: Transport>(client: &ApiClient<T>, token: &str, password: &str) -> Result<(), ApiError> {
    let body = ResetPasswordRequest { token: token.to_owned(), password: password.to_owned() };
    let _: IgnoredAny = client.post("/auth/reset-password", &body).await?;
    Ok(())
}

/// `GET /professionals` with filters.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn list_professionals<T: Transport>(
    client: &ApiClient<T>,
    query: &ProfessionalQuery,
) -> Result<ProfessionalList, ApiError> {
    client.get(&professionals_endpoint(query)).await
}

/// `GET /professionals/:id`.
///
/// # Errors
///
/// Any [`ApiError`]; a 404 surfaces as `ApiError::Status`.
pub async fn get_professional<T: Transport>(client: &ApiClient<T>, id: i64) -> Result<ProfessionalDetail, ApiError> {
    client.get(&professional_endpoint(id)).await
}

/// `POST /appointments` with status `pending`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn request_appointment<T: Transport>(
    client: &ApiClient<T>,
    request: &AppointmentRequest,
) -> Result<AppointmentCreated, ApiError> {
    client.post("/appointments", request).await
}

/// `GET /calendar/status`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn calendar_status<T: Transport>(client: &ApiClient<T>) -> Result<CalendarStatus, ApiError> {
    client.get("/calendar/status").await
}

/// `GET /calendar/events`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn list_calendar_events<T: Transport>(client: &ApiClient<T>) -> Result<Vec<CalendarEvent>, ApiError> {
    let list: CalendarEventList = client.get("/calendar/events").await?;
    Ok(list.items)
}

/// `POST /calendar/events`. `request_id` keys conference creation.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn create_calendar_event<T: Transport>(
    client: &ApiClient<T>,
    draft: &CalendarEventDraft,
    request_id: &str,
) -> Result<CalendarEvent, ApiError> {
    client.post("/calendar/events", &draft.to_payload(request_id)).await
}

/// `PUT /calendar/events/:id` with a new title.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn rename_calendar_event<T: Transport>(client: &ApiClient<T>, id: &str, summary: &str) -> Result<(), ApiError> {
    let body = RenameEventRequest { summary: summary.to_owned() };
    let _: IgnoredAny = client.put(&calendar_event_endpoint(id), &body).await?;
    Ok(())
}

/// `DELETE /calendar/events/:id`.
///
/// # Errors
///
/// Any [`ApiError`].
pub async fn delete_calendar_event<T: Transport>(client: &ApiClient<T>, id: &str) -> Result<(), ApiError> {
    let _: IgnoredAny = client.delete(&calendar_event_endpoint(id)).await?;
    Ok(())
}
