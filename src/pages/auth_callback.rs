//! Landing route after the backend finishes Google OAuth.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend sets the session cookie before redirecting here. Older
//! deployments also append `?token=` with a bearer credential, which is
//! adopted when present. Either way the session is refreshed once and the
//! user lands on the profile, or home if the refresh found no identity.

#[cfg(test)]
#[path = "auth_callback_test.rs"]
mod auth_callback_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::session::{POST_LOGIN_ROUTE, use_session};
use crate::util::scope::ViewScope;

/// Non-blank `token` query value.
pub(crate) fn callback_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

pub(crate) fn callback_destination(authenticated: bool) -> &'static str {
    if authenticated { POST_LOGIN_ROUTE } else { "/" }
}

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();
    let navigate = use_navigate();
    let query = use_query_map();

    let token = callback_token(query.with_untracked(|q| q.get("token")));
    scope.spawn(async move {
        if let Some(token) = token {
            session.login_with_token(&token);
        }
        session.refresh().await;
        let authenticated = session.snapshot().is_authenticated();
        if !authenticated {
            log::warn!("auth-callback: no session after OAuth redirect");
        }
        navigate(
            callback_destination(authenticated),
            NavigateOptions { replace: true, ..NavigateOptions::default() },
        );
    });

    view! { <div class="auth-callback">"Autenticando com o Google, aguarde..."</div> }
}
