//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the single session store. It provides two contexts: the
//! read-only `RwSignal<SessionState>` that views and the route guard track,
//! and the `AppSession` handle whose operations mutate it. The session is
//! restored exactly once, when the app mounts.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::config::ClientConfig;
use crate::net::http::{ApiClient, FetchTransport};
use crate::pages::{
    auth_callback::AuthCallbackPage, calendar::CalendarPage, forgot_password::ForgotPasswordPage, home::HomePage,
    login::LoginPage, professional::ProfessionalPage, profile::ProfilePage, register::RegisterPage,
    reset_password::ResetPasswordPage,
};
use crate::state::session::{AppSession, Session, SessionState};
use crate::util::auth::RequireAuth;
use crate::util::browser::WebBrowser;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_env();
    log::debug!("app: api base {}", config.api_base);

    let state = RwSignal::new(SessionState::pending());
    let session: AppSession = Session::new(state, ApiClient::new(FetchTransport, config), WebBrowser);
    provide_context(state);
    provide_context(session.clone());

    leptos::task::spawn_local(async move { session.restore().await });

    view! {
        <Title text="Saúde Plus"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| view! { <p class="not-found">"404: Página Não Encontrada"</p> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=(StaticSegment("p"), ParamSegment("id")) view=ProfessionalPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=(StaticSegment("reset-password"), ParamSegment("token")) view=ResetPasswordPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <RequireAuth><ProfilePage/></RequireAuth> }
                    />
                    <Route
                        path=StaticSegment("calendar")
                        view=|| view! { <RequireAuth><CalendarPage/></RequireAuth> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
