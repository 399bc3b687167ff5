//! Professional detail page with the appointment request form.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/p/:id` can change in place (links between profiles reuse the view), so
//! the detail load is keyed on the route param and only the newest load
//! applies. Booking requires a session; signed-out visitors see the form
//! disabled with a Google sign-in prompt.

#[cfg(test)]
#[path = "professional_test.rs"]
mod professional_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::api;
use crate::net::types::{AppointmentRequest, ProfessionalDetail};
use crate::state::session::{SessionState, use_session};
use crate::util::format::{display_title, format_location, format_price_brl, format_rating, whatsapp_link};
use crate::util::scope::{LatestRequest, ViewScope};
use crate::util::time::{RangeError, range_to_rfc3339_local};

const AVATAR_FALLBACK: &str = "/img/avatar-fallback.png";
pub(crate) const BOOKING_SENT: &str = "Solicitação enviada! O profissional irá avaliar e confirmar.";

pub(crate) fn parse_professional_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok().filter(|id: &i64| *id > 0)
}

/// Validate the booking range and build the pending request.
pub(crate) fn build_booking(professional_id: i64, start: &str, end: &str) -> Result<AppointmentRequest, RangeError> {
    let (starts_at, ends_at) = range_to_rfc3339_local(start, end)?;
    Ok(AppointmentRequest::pending(professional_id, starts_at, ends_at))
}

#[derive(Clone, Debug, PartialEq)]
enum Detail {
    Loading,
    Missing,
    Loaded(Box<ProfessionalDetail>),
}

#[component]
pub fn ProfessionalPage() -> impl IntoView {
    let session = use_session();
    let state = expect_context::<RwSignal<SessionState>>();
    let scope = ViewScope::for_view();
    let latest = LatestRequest::new();
    let params = use_params_map();

    let detail = RwSignal::new(Detail::Loading);
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let sending = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);

    {
        let session = session.clone();
        let scope = scope.clone();
        Effect::new(move || {
            let id = params.with(|p| parse_professional_id(p.get("id").as_deref()));
            let ticket = latest.issue();
            let Some(id) = id else {
                detail.set(Detail::Missing);
                return;
            };
            detail.set(Detail::Loading);
            let session = session.clone();
            let latest = latest.clone();
            scope.spawn(async move {
                let result = api::get_professional(session.client(), id).await;
                if !latest.is_latest(ticket) {
                    return;
                }
                match result {
                    Ok(found) => detail.set(Detail::Loaded(Box::new(found))),
                    Err(e) => {
                        log::warn!("professional: failed to load {id}: {e}");
                        detail.set(Detail::Missing);
                    }
                }
            });
        });
    }

    let authenticated = move || state.get().is_authenticated();

    let on_request = Callback::new({
        let session = session.clone();
        move |()| {
            if sending.get_untracked() {
                return;
            }
            let Detail::Loaded(found) = detail.get_untracked() else {
                return;
            };
            let booking = match build_booking(found.card.id, &start.get_untracked(), &end.get_untracked()) {
                Ok(booking) => booking,
                Err(e) => {
                    message.set(Some(e.to_string()));
                    return;
                }
            };
            sending.set(true);
            message.set(None);
            let session = session.clone();
            scope.spawn(async move {
                match api::request_appointment(session.client(), &booking).await {
                    Ok(created) => {
                        log::info!("professional: appointment {} requested", created.id);
                        message.set(Some(BOOKING_SENT.to_owned()));
                        start.set(String::new());
                        end.set(String::new());
                    }
                    Err(e) => message.set(Some(e.to_string())),
                }
                sending.set(false);
            });
        }
    });

    let on_google = Callback::new(move |()| session.login_with_google());

    let header = move || {
        let Detail::Loaded(found) = detail.get() else {
            return ().into_any();
        };
        let card = found.card;
        let title = display_title(&card);
        let location = format_location(&card);
        let price = format!("{} • {} min", format_price_brl(card.price_cents), card.session_minutes);
        let avatar = card.avatar_url.clone().unwrap_or_else(|| AVATAR_FALLBACK.to_owned());
        let rating = format_rating(card.rating);
        let whatsapp = card.whatsapp.as_deref().and_then(whatsapp_link);
        view! {
            <div class="pro-detail__header">
                <img class="pro-detail__avatar" src=avatar alt=card.full_name.clone()/>
                <div>
                    <h1>{title}</h1>
                    <p class="pro-detail__location">{location}</p>
                    <div class="pro-card__tags">
                        {card
                            .modalities
                            .into_iter()
                            .map(|m| view! { <span class="pro-card__tag">{m}</span> })
                            .collect_view()}
                        {rating.map(|r| view! { <span class="pro-card__rating">{r}</span> })}
                    </div>
                    <p class="pro-detail__price">{price}</p>
                    {whatsapp
                        .map(|href| {
                            view! {
                                <a class="pro-detail__whatsapp" href=href target="_blank" rel="noreferrer">
                                    "Falar no WhatsApp"
                                </a>
                            }
                        })}
                </div>
            </div>
            {found
                .bio
                .filter(|bio| !bio.trim().is_empty())
                .map(|bio| {
                    view! {
                        <section class="pro-detail__bio">
                            <h2>"Sobre"</h2>
                            <p>{bio}</p>
                        </section>
                    }
                })}
        }
        .into_any()
    };

    view! {
        <div class="pro-detail">
            {move || match detail.get() {
                Detail::Loading => view! { <p class="page-status">"Carregando…"</p> }.into_any(),
                Detail::Missing => view! { <p class="page-status">"Profissional não encontrado."</p> }.into_any(),
                Detail::Loaded(_) => ().into_any(),
            }}
            {header}
            <Show when=move || matches!(detail.get(), Detail::Loaded(_))>
                <section class="booking">
                    <h2>"Solicitar horário"</h2>
                    <Show when=move || !authenticated()>
                        <div class="booking__notice">
                            "Faça login para solicitar um horário. "
                            <button class="link-button" on:click=move |_| on_google.run(())>"Entrar com Google"</button>
                        </div>
                    </Show>
                    <div class="booking__fields">
                        <label>
                            <span>"Início"</span>
                            <input
                                type="datetime-local"
                                prop:value=move || start.get()
                                on:input=move |ev| start.set(event_target_value(&ev))
                                disabled=move || !authenticated()
                            />
                        </label>
                        <label>
                            <span>"Fim"</span>
                            <input
                                type="datetime-local"
                                prop:value=move || end.get()
                                on:input=move |ev| end.set(event_target_value(&ev))
                                disabled=move || !authenticated()
                            />
                        </label>
                    </div>
                    <button
                        class="booking__submit"
                        on:click=move |_| on_request.run(())
                        disabled=move || !authenticated() || sending.get() || start.get().is_empty() || end.get().is_empty()
                    >
                        {move || if sending.get() { "Enviando…" } else { "Solicitar agendamento" }}
                    </button>
                    {move || message.get().map(|msg| view! { <p class="booking__message">{msg}</p> })}
                </section>
            </Show>
        </div>
    }
}
