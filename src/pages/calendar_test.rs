use super::*;

fn form() -> EventForm {
    EventForm {
        title: "  Consulta  ".to_owned(),
        description: "Primeira sessão".to_owned(),
        start: "2025-06-02T09:00".to_owned(),
        end: "2025-06-02T10:00".to_owned(),
        time_zone: "America/Recife".to_owned(),
        with_meet_link: true,
    }
}

fn event(id: &str, summary: &str) -> CalendarEvent {
    CalendarEvent {
        id: Some(id.to_owned()),
        summary: Some(summary.to_owned()),
        ..CalendarEvent::default()
    }
}

// =============================================================
// EventForm
// =============================================================

#[test]
fn draft_trims_title_and_keeps_zone() {
    let draft = form().to_draft("America/Sao_Paulo").unwrap();
    assert_eq!(draft.title, "Consulta");
    assert_eq!(draft.time_zone, "America/Recife");
    assert!(draft.with_meet_link);
    assert!(draft.starts_at.starts_with("2025-06-02T09:00:00"));
    assert!(draft.ends_at.starts_with("2025-06-02T10:00:00"));
}

#[test]
fn blank_zone_uses_default() {
    let mut raw = form();
    raw.time_zone = "  ".to_owned();
    let draft = raw.to_draft("America/Sao_Paulo").unwrap();
    assert_eq!(draft.time_zone, "America/Sao_Paulo");
}

#[test]
fn missing_title_is_rejected() {
    let mut raw = form();
    raw.title = " ".to_owned();
    assert_eq!(raw.to_draft("UTC"), Err("Informe o título do evento.".to_owned()));
}

#[test]
fn inverted_range_is_rejected() {
    let mut raw = form();
    raw.end = "2025-06-02T08:00".to_owned();
    assert_eq!(raw.to_draft("UTC"), Err("O fim deve ser depois do início.".to_owned()));
}

#[test]
fn offsets_follow_the_event_zone() {
    let mut raw = form();
    raw.time_zone = "America/New_York".to_owned();
    let draft = raw.to_draft("UTC").unwrap();
    assert_eq!(draft.starts_at, "2025-06-02T09:00:00-04:00");
    assert_eq!(draft.ends_at, "2025-06-02T10:00:00-04:00");
    assert_eq!(draft.time_zone, "America/New_York");
}

#[test]
fn default_zone_sets_offsets_when_blank() {
    let mut raw = form();
    raw.time_zone = String::new();
    let draft = raw.to_draft("America/Sao_Paulo").unwrap();
    assert_eq!(draft.starts_at, "2025-06-02T09:00:00-03:00");
}

#[test]
fn unknown_zone_is_rejected() {
    let mut raw = form();
    raw.time_zone = "Mars/Olympus".to_owned();
    assert_eq!(raw.to_draft("UTC"), Err("Fuso horário inválido: Mars/Olympus".to_owned()));
}

#[test]
fn new_form_defaults_to_meet_link() {
    let fresh = EventForm::new("UTC".to_owned());
    assert!(fresh.with_meet_link);
    assert!(fresh.title.is_empty());
    assert_eq!(fresh.time_zone, "UTC");
}

// =============================================================
// List edits
// =============================================================

#[test]
fn validate_rename_trims() {
    assert_eq!(validate_rename("  Retorno "), Ok("Retorno".to_owned()));
    assert_eq!(validate_rename("   "), Err("Informe o novo título."));
}

#[test]
fn rename_only_touches_matching_event() {
    let mut events = vec![event("a", "Um"), event("b", "Dois")];
    apply_rename(&mut events, "b", "Três");
    assert_eq!(events[0].summary.as_deref(), Some("Um"));
    assert_eq!(events[1].summary.as_deref(), Some("Três"));
}

#[test]
fn remove_drops_matching_event() {
    let mut events = vec![event("a", "Um"), event("b", "Dois")];
    remove_event(&mut events, "a");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id.as_deref(), Some("b"));

    remove_event(&mut events, "missing");
    assert_eq!(events.len(), 1);
}
