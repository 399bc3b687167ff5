//! Account creation with e-mail and password.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session;
use crate::util::scope::ViewScope;

pub(crate) const PASSWORD_MISMATCH: &str = "As senhas não coincidem.";

/// Checked before any network call.
pub(crate) fn validate_register_input(
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Informe e-mail e senha.");
    }
    if password != confirm {
        return Err(PASSWORD_MISMATCH);
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let (email_value, password_value) = match validate_register_input(
            &email.get_untracked(),
            &password.get_untracked(),
            &confirm.get_untracked(),
        ) {
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
            match session.register(&email_value, &password_value).await {
                Ok(route) => navigate(route, NavigateOptions { replace: true, ..NavigateOptions::default() }),
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Criar conta"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label" for="email">"Email"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
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
                    <Show when=move || error.get().is_some()>
                        <div class="auth-notice auth-notice--error">{move || error.get().unwrap_or_default()}</div>
                    </Show>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Criando…" } else { "Criar conta" }}
                    </button>
                </form>
                <div class="auth-links">
                    <A href="/login">"Já tenho conta"</A>
                </div>
            </div>
        </div>
    }
}
