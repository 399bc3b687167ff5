//! Top navigation bar with the session status.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::{SessionState, use_session};
use crate::util::auth::LOGOUT_ROUTE;
use crate::util::scope::ViewScope;

#[component]
pub fn Navbar() -> impl IntoView {
    let state = expect_context::<RwSignal<SessionState>>();
    let session = use_session();
    let scope = ViewScope::for_view();
    let navigate = use_navigate();

    let on_logout = {
        let session = session.clone();
        move |_| {
            let session = session.clone();
            let navigate = navigate.clone();
            scope.spawn(async move {
                session.logout().await;
                navigate(LOGOUT_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
            });
        }
    };

    let on_google = move |_| session.login_with_google();

    let status = move || {
        let snapshot = state.get();
        if snapshot.loading {
            return view! { <span class="navbar__status">"…"</span> }.into_any();
        }
        if snapshot.is_authenticated() {
            let email = snapshot.email().unwrap_or("Conectado").to_owned();
            let on_logout = on_logout.clone();
            view! {
                <span class="navbar__email">{email}</span>
                <button class="navbar__button navbar__button--logout" on:click=on_logout>
                    "Sair"
                </button>
            }
            .into_any()
        } else {
            let on_google = on_google.clone();
            view! {
                <A href="/login" attr:class="navbar__link">"Entrar"</A>
                <button class="navbar__button" on:click=on_google>
                    "Entrar com Google"
                </button>
            }
            .into_any()
        }
    };

    view! {
        <nav class="navbar">
            <A href="/" attr:class="navbar__brand">"Saúde Plus"</A>
            <div class="navbar__links">
                <A href="/" attr:class="navbar__link">"Início"</A>
                <A href="/calendar" attr:class="navbar__link">"Calendário"</A>
                <A href="/profile" attr:class="navbar__link">"Perfil"</A>
            </div>
            <div class="navbar__session">{status}</div>
        </nav>
    }
}
