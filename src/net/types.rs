//! Wire DTOs for the booking backend's REST surface.
//!
//! DESIGN
//! ======
//! Field names follow the backend JSON exactly (`snake_case` for the
//! marketplace API, Google's `camelCase` for calendar events) so payloads
//! deserialize without adapters.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by `GET /me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}

/// `GET /me` body: `{ email }` when signed in, `{ error }` otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MeResponse {
    /// The identity, if the payload carries a non-empty e-mail.
    pub fn into_identity(self) -> Option<Identity> {
        self.email.filter(|e| !e.trim().is_empty()).map(|email| Identity { email })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of a successful login/register. The token is the legacy path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

// =============================================================================
// PROFESSIONALS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    Psychology,
    Nutrition,
}

impl Profession {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Psychology => "psychology",
            Self::Nutrition => "nutrition",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "psychology" => Some(Self::Psychology),
            "nutrition" => Some(Self::Nutrition),
            _ => None,
        }
    }

    /// Title prefix shown before a professional's name.
    pub fn title(self) -> &'static str {
        match self {
            Self::Psychology => "Psicólogo(a)",
            Self::Nutrition => "Nutricionista",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Online,
    Presencial,
}

impl Modality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Presencial => "presencial",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "online" => Some(Self::Online),
            "presencial" => Some(Self::Presencial),
            _ => None,
        }
    }
}

/// Listing entry as returned by `GET /professionals`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalCard {
    pub id: i64,
    pub full_name: String,
    pub profession: Profession,
    #[serde(default)]
    pub register_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    /// Price in centavos.
    pub price_cents: i64,
    pub session_minutes: u32,
    #[serde(default)]
    pub modalities: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// `GET /professionals/:id`: the card plus a biography.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalDetail {
    #[serde(flatten)]
    pub card: ProfessionalCard,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfessionalList {
    #[serde(default)]
    pub items: Vec<ProfessionalCard>,
}

/// Filters for the listing endpoint. Empty fields are left out of the URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfessionalQuery {
    pub profession: Option<Profession>,
    pub city: Option<String>,
    pub modality: Option<Modality>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub q: Option<String>,
}

impl ProfessionalQuery {
    /// Encoded `k=v&...` string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(profession) = self.profession {
            pairs.push(("profession", profession.as_str().to_owned()));
        }
        push_text(&mut pairs, "city", self.city.as_deref());
        if let Some(modality) = self.modality {
            pairs.push(("modality", modality.as_str().to_owned()));
        }
        if let Some(min) = self.price_min {
            pairs.push(("price_min", min.to_string()));
        }
        if let Some(max) = self.price_max {
            pairs.push(("price_max", max.to_string()));
        }
        push_text(&mut pairs, "q", self.q.as_deref());
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn push_text<'a>(pairs: &mut Vec<(&'a str, String)>, key: &'a str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_owned()));
    }
}

// =============================================================================
// APPOINTMENTS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
}

/// `POST /appointments` body. Always created as pending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppointmentRequest {
    pub professional_id: i64,
    pub starts_at: String,
    pub ends_at: String,
    pub status: AppointmentStatus,
}

impl AppointmentRequest {
    pub fn pending(professional_id: i64, starts_at: String, ends_at: String) -> Self {
        Self { professional_id, starts_at, ends_at, status: AppointmentStatus::Pending }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AppointmentCreated {
    pub id: i64,
}

// =============================================================================
// CALENDAR
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarStatus {
    #[serde(default)]
    pub connected: bool,
}

/// Form contents for a new calendar event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarEventDraft {
    pub title: String,
    pub description: String,
    /// RFC 3339 with offset.
    pub starts_at: String,
    pub ends_at: String,
    pub time_zone: String,
    pub with_meet_link: bool,
}

impl CalendarEventDraft {
    /// Provider-shaped body for `POST /calendar/events`.
    ///
    /// `request_id` must be unique per creation attempt; Google deduplicates
    /// conference creation on it.
    pub fn to_payload(&self, request_id: &str) -> NewCalendarEvent {
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_owned);
        let conference_data = self.with_meet_link.then(|| ConferenceRequest {
            create_request: CreateConferenceRequest {
                conference_solution_key: ConferenceSolutionKey { kind: "hangoutsMeet".to_owned() },
                request_id: request_id.to_owned(),
            },
        });
        NewCalendarEvent {
            summary: self.title.trim().to_owned(),
            description,
            start: EventTime { date_time: Some(self.starts_at.clone()), time_zone: Some(self.time_zone.clone()) },
            end: EventTime { date_time: Some(self.ends_at.clone()), time_zone: Some(self.time_zone.clone()) },
            conference_data,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<ConferenceRequest>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceRequest {
    pub create_request: CreateConferenceRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConferenceRequest {
    pub conference_solution_key: ConferenceSolutionKey,
    pub request_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConferenceSolutionKey {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Event object returned by the provider proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default)]
    pub hangout_link: Option<String>,
    #[serde(default)]
    pub conference_data: Option<ConferenceData>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub uri: String,
    #[serde(default)]
    pub entry_point_type: Option<String>,
}

impl CalendarEvent {
    /// Join link: `hangoutLink`, else the video entry point, else any entry point.
    pub fn meeting_link(&self) -> Option<&str> {
        if let Some(link) = self.hangout_link.as_deref().filter(|l| !l.is_empty()) {
            return Some(link);
        }
        let points = &self.conference_data.as_ref()?.entry_points;
        points
            .iter()
            .find(|p| p.entry_point_type.as_deref() == Some("video"))
            .or_else(|| points.first())
            .map(|p| p.uri.as_str())
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.date_time.as_deref().unwrap_or("?");
        let end = self.end.date_time.as_deref().unwrap_or("?");
        write!(f, "{} ({start} → {end})", self.summary.as_deref().unwrap_or("(sem título)"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CalendarEventList {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenameEventRequest {
    pub summary: String,
}
