//! Choose a new password from an e-mailed reset token.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::net::api;
use crate::state::session::use_session;
use crate::util::auth::LOGIN_ROUTE;
use crate::util::scope::ViewScope;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;
/// Pause on the success notice before going to the login page.
#[cfg(feature = "csr")]
const REDIRECT_DELAY_MS: u64 = 1200;

/// Checks run in order; the first failure is reported.
pub(crate) fn validate_reset_input(
    token: Option<&str>,
    password: &str,
    confirm: &str,
) -> Result<(String, String), &'static str> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Err("Token ausente.");
    };
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("A senha deve ter pelo menos 6 caracteres.");
    }
    if password != confirm {
        return Err("As senhas não coincidem.");
    }
    Ok((token.to_owned(), password.to_owned()))
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();
    let navigate = use_navigate();
    let params = use_params_map();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let done = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let token = params.with_untracked(|p| p.get("token"));
        let (token, password_value) =
            match validate_reset_input(token.as_deref(), &password.get_untracked(), &confirm.get_untracked()) {
                Ok(values) => values,
                Err(msg) => {
                    error.set(Some(msg.to_owned()));
                    return;
                }
            };
        busy.set(true);
        let session = session.clone();
        let navigate = navigate.clone();
        scope.spawn(async move {
            match api::reset_password(session.client(), &token, &password_value).await {
                Ok(()) => {
                    done.set(true);
                    busy.set(false);
                    #[cfg(feature = "csr")]
                    gloo_timers::future::sleep(std::time::Duration::from_millis(REDIRECT_DELAY_MS)).await;
                    navigate(LOGIN_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Nova senha"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label" for="password">"Senha"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        required=true
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="auth-label" for="confirm">"Confirmar senha"</label>
                    <input
                        id="confirm"
                        class="auth-input"
                        type="password"
                        required=true
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    {move || error.get().map(|msg| view! { <div class="auth-notice auth-notice--error">{msg}</div> })}
                    <Show when=move || done.get()>
                        <div class="auth-notice auth-notice--success">"Senha alterada!"</div>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Salvando…" } else { "Salvar nova senha" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
