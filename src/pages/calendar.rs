//! Google Calendar management through the backend proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! Calendar endpoints authenticate with the cookie session and, on legacy
//! deployments, the bearer token, so every call here goes through
//! `Session::bearer_client`. Events are created with an optional Meet link;
//! each creation attempt gets a fresh conference request id.
//!
//! The event list is kept locally after the first load: create, rename and
//! delete patch it in place on success instead of re-fetching.

#[cfg(test)]
#[path = "calendar_test.rs"]
mod calendar_test;

use chrono_tz::Tz;
use leptos::prelude::*;

use crate::net::api;
use crate::net::types::{CalendarEvent, CalendarEventDraft};
use crate::pages::profile::CalendarLink;
use crate::state::session::use_session;
use crate::util::browser::local_time_zone;
use crate::util::scope::ViewScope;
use crate::util::time::range_to_rfc3339_in;

/// Raw form values for a new event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EventForm {
    pub title: String,
    pub description: String,
    pub start: String,
    pub end: String,
    pub time_zone: String,
    pub with_meet_link: bool,
}

impl EventForm {
    fn new(time_zone: String) -> Self {
        Self { time_zone, with_meet_link: true, ..Self::default() }
    }

    /// Validate and convert to a draft; blank zone falls back to `default_zone`.
    ///
    /// Start and end are resolved in the event's zone, so the offsets sent
    /// agree with the `timeZone` Google stores.
    pub(crate) fn to_draft(&self, default_zone: &str) -> Result<CalendarEventDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Informe o título do evento.".to_owned());
        }
        let time_zone = Some(self.time_zone.trim()).filter(|tz| !tz.is_empty()).unwrap_or(default_zone);
        let tz: Tz = time_zone.parse().map_err(|_| format!("Fuso horário inválido: {time_zone}"))?;
        let (starts_at, ends_at) = range_to_rfc3339_in(&self.start, &self.end, &tz).map_err(|e| e.to_string())?;
        Ok(CalendarEventDraft {
            title: title.to_owned(),
            description: self.description.clone(),
            starts_at,
            ends_at,
            time_zone: time_zone.to_owned(),
            with_meet_link: self.with_meet_link,
        })
    }
}

pub(crate) fn validate_rename(summary: &str) -> Result<String, &'static str> {
    let summary = summary.trim();
    if summary.is_empty() {
        return Err("Informe o novo título.");
    }
    Ok(summary.to_owned())
}

pub(crate) fn apply_rename(events: &mut [CalendarEvent], id: &str, summary: &str) {
    for event in events.iter_mut().filter(|e| e.id.as_deref() == Some(id)) {
        event.summary = Some(summary.to_owned());
    }
}

pub(crate) fn remove_event(events: &mut Vec<CalendarEvent>, id: &str) {
    events.retain(|e| e.id.as_deref() != Some(id));
}

#[component]
pub fn CalendarPage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();
    let default_zone = session.client().config().default_time_zone.clone();
    let connect_url = session.client().config().google_calendar_url();

    let status = RwSignal::new(CalendarLink::Checking);
    let events = RwSignal::new(Vec::<CalendarEvent>::new());
    let events_loading = RwSignal::new(true);
    let form = RwSignal::new(EventForm::new(local_time_zone().unwrap_or_else(|| default_zone.clone())));
    let creating = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);
    let last_link = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<(String, String)>);

    {
        let client = session.bearer_client();
        scope.spawn(async move {
            status.set(CalendarLink::from_result(api::calendar_status(&client).await));
            match api::list_calendar_events(&client).await {
                Ok(items) => events.set(items),
                Err(e) => message.set(Some(format!("Erro ao carregar eventos: {e}"))),
            }
            events_loading.set(false);
        });
    }

    let on_create = {
        let session = session.clone();
        let scope = scope.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if creating.get_untracked() {
                return;
            }
            let draft = match form.with_untracked(|f| f.to_draft(&default_zone)) {
                Ok(draft) => draft,
                Err(msg) => {
                    message.set(Some(msg));
                    return;
                }
            };
            creating.set(true);
            message.set(None);
            last_link.set(None);
            let client = session.bearer_client();
            let request_id = uuid::Uuid::new_v4().to_string();
            scope.spawn(async move {
                match api::create_calendar_event(&client, &draft, &request_id).await {
                    Ok(created) => {
                        last_link.set(created.meeting_link().map(str::to_owned));
                        message.set(Some(format!("Evento criado: {created}")));
                        events.update(|list| list.push(created));
                        form.update(|f| *f = EventForm::new(f.time_zone.clone()));
                    }
                    Err(e) => message.set(Some(format!("Erro ao criar evento: {e}"))),
                }
                creating.set(false);
            });
        }
    };

    let on_rename = Callback::new({
        let session = session.clone();
        let scope = scope.clone();
        move |()| {
            let Some((id, draft)) = editing.get_untracked() else {
                return;
            };
            let summary = match validate_rename(&draft) {
                Ok(summary) => summary,
                Err(msg) => {
                    message.set(Some(msg.to_owned()));
                    return;
                }
            };
            let client = session.bearer_client();
            scope.spawn(async move {
                match api::rename_calendar_event(&client, &id, &summary).await {
                    Ok(()) => {
                        events.update(|list| apply_rename(list, &id, &summary));
                        editing.set(None);
                    }
                    Err(e) => message.set(Some(format!("Erro ao renomear evento: {e}"))),
                }
            });
        }
    });

    let on_delete = Callback::new(move |id: String| {
        let client = session.bearer_client();
        scope.spawn(async move {
            match api::delete_calendar_event(&client, &id).await {
                Ok(()) => events.update(|list| remove_event(list, &id)),
                Err(e) => message.set(Some(format!("Erro ao excluir evento: {e}"))),
            }
        });
    });

    let event_row = move |event: CalendarEvent| {
        let id = event.id.clone().unwrap_or_default();
        let link = event.meeting_link().map(str::to_owned);
        let row_id = id.clone();
        let is_editing = move || editing.with(|e| e.as_ref().is_some_and(|(editing_id, _)| *editing_id == row_id));
        let start_edit = {
            let id = id.clone();
            let summary = event.summary.clone().unwrap_or_default();
            move |_| editing.set(Some((id.clone(), summary.clone())))
        };
        let delete_id = id.clone();
        view! {
            <li class="calendar__event">
                <div class="calendar__event-body">
                    <Show
                        when=is_editing
                        fallback={
                            let label = event.to_string();
                            move || view! { <span>{label.clone()}</span> }
                        }
                    >
                        <input
                            class="calendar__rename"
                            type="text"
                            prop:value=move || editing.with(|e| e.as_ref().map(|(_, s)| s.clone()).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editing.update(|e| {
                                    if let Some((_, s)) = e.as_mut() {
                                        *s = value;
                                    }
                                });
                            }
                        />
                        <button on:click=move |_| on_rename.run(())>"Salvar"</button>
                        <button on:click=move |_| editing.set(None)>"Cancelar"</button>
                    </Show>
                    {link.map(|href| {
                        view! {
                            <a class="calendar__meet" href=href target="_blank" rel="noreferrer">
                                "Link do Google Meet"
                            </a>
                        }
                    })}
                </div>
                <div class="calendar__event-actions">
                    <button title="Renomear" disabled=id.is_empty() on:click=start_edit>"✏️"</button>
                    <button
                        title="Excluir"
                        disabled=id.is_empty()
                        on:click=move |_| on_delete.run(delete_id.clone())
                    >
                        "🗑️"
                    </button>
                </div>
            </li>
        }
    };

    view! {
        <div class="calendar">
            <h1>"Meus eventos"</h1>
            <p class="calendar__status">{move || status.with(CalendarLink::label)}</p>
            <Show when=move || status.with(CalendarLink::offers_connect)>
                <a class="calendar__connect" href=connect_url.clone()>"Conectar Google Agenda"</a>
            </Show>

            <form class="calendar__form" on:submit=on_create>
                <h2>"Criar novo evento"</h2>
                <input
                    type="text"
                    placeholder="Título"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.title = value);
                    }
                />
                <textarea
                    placeholder="Descrição"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| f.description = value);
                    }
                ></textarea>
                <label>
                    <span>"Início"</span>
                    <input
                        type="datetime-local"
                        prop:value=move || form.with(|f| f.start.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.start = value);
                        }
                    />
                </label>
                <label>
                    <span>"Fim"</span>
                    <input
                        type="datetime-local"
                        prop:value=move || form.with(|f| f.end.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.end = value);
                        }
                    />
                </label>
                <label>
                    <span>"Fuso horário"</span>
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.time_zone.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.time_zone = value);
                        }
                    />
                </label>
                <label class="calendar__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.with_meet_link)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.with_meet_link = checked);
                        }
                    />
                    <span>"Gerar link do Google Meet"</span>
                </label>
                <button type="submit" disabled=move || creating.get()>
                    {move || if creating.get() { "Criando…" } else { "Criar evento" }}
                </button>
            </form>

            {move || message.get().map(|msg| view! { <p class="calendar__message">{msg}</p> })}
            {move || {
                last_link
                    .get()
                    .map(|href| {
                        view! {
                            <p class="calendar__message">
                                <a href=href.clone() target="_blank" rel="noreferrer">{href.clone()}</a>
                            </p>
                        }
                    })
            }}

            <Show
                when=move || !events_loading.get()
                fallback=|| view! { <p class="page-status">"Carregando eventos..."</p> }
            >
                <ul class="calendar__events">
                    <For
                        each=move || events.get()
                        key=|event| (event.id.clone(), event.summary.clone())
                        children=event_row
                    />
                </ul>
            </Show>
        </div>
    }
}
