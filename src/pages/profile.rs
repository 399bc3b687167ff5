//! Signed-in user's profile: identity, calendar connection, logout.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::http::ApiError;
use crate::net::types::CalendarStatus;
use crate::state::session::{SessionState, use_session};
use crate::util::auth::LOGOUT_ROUTE;
use crate::util::scope::ViewScope;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CalendarLink {
    Checking,
    Connected,
    Disconnected,
    Unknown(String),
}

impl CalendarLink {
    pub(crate) fn from_result(result: Result<CalendarStatus, ApiError>) -> Self {
        match result {
            Ok(CalendarStatus { connected: true }) => Self::Connected,
            Ok(CalendarStatus { connected: false }) => Self::Disconnected,
            Err(e) => Self::Unknown(e.to_string()),
        }
    }

    pub(crate) fn label(&self) -> String {
        match self {
            Self::Checking => "Verificando…".to_owned(),
            Self::Connected => "Google Agenda conectada".to_owned(),
            Self::Disconnected => "Google Agenda não conectada".to_owned(),
            Self::Unknown(reason) => format!("Não foi possível verificar a agenda: {reason}"),
        }
    }

    /// Offer the connect link unless already connected.
    pub(crate) fn offers_connect(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Unknown(_))
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let state = expect_context::<RwSignal<SessionState>>();
    let scope = ViewScope::for_view();
    let navigate = use_navigate();

    let calendar = RwSignal::new(CalendarLink::Checking);
    let connect_url = session.client().config().google_calendar_url();

    {
        let client = session.bearer_client();
        scope.spawn(async move {
            calendar.set(CalendarLink::from_result(api::calendar_status(&client).await));
        });
    }

    let on_logout = move |_| {
        let session = session.clone();
        let navigate = navigate.clone();
        scope.spawn(async move {
            session.logout().await;
            navigate(LOGOUT_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        });
    };

    view! {
        <div class="profile">
            <div class="profile__card">
                <h1>"Meu perfil"</h1>
                <p class="profile__row">
                    <strong>"Email: "</strong>
                    {move || state.with(|s| s.email().unwrap_or("(sessão por token)").to_owned())}
                </p>
                <p class="profile__row">{move || calendar.with(CalendarLink::label)}</p>
                <Show when=move || calendar.with(CalendarLink::offers_connect)>
                    <a class="profile__connect" href=connect_url.clone()>"Conectar Google Agenda"</a>
                </Show>
                <button class="profile__logout" on:click=on_logout>"Sair"</button>
            </div>
        </div>
    }
}
