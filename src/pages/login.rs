//! Login page: e-mail + password, or Google OAuth.
//!
//! ERROR HANDLING
//! ==============
//! Accounts created through Google have no password. The backend reports
//! that as `ACCOUNT_NO_PASSWORD`, shown as an informational notice with a
//! link to the forgot-password flow instead of a plain error.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::{LoginFailure, use_session};
use crate::util::scope::ViewScope;

/// Trim the e-mail and require both fields.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Informe e-mail e senha.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Notice {
    Error(String),
    NoPassword(String),
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = {
        let session = session.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get_untracked() {
                return;
            }
            let (email_value, password_value) =
                match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
                    Ok(values) => values,
                    Err(msg) => {
                        notice.set(Some(Notice::Error(msg.to_owned())));
                        return;
                    }
                };
            notice.set(None);
            busy.set(true);
            let session = session.clone();
            let navigate = navigate.clone();
            scope.spawn(async move {
                match session.login_with_password(&email_value, &password_value).await {
                    Ok(route) => {
                        navigate(route, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    Err(LoginFailure::PasswordNotSet { message }) => notice.set(Some(Notice::NoPassword(message))),
                    Err(failure) => notice.set(Some(Notice::Error(failure.to_string()))),
                }
                busy.set(false);
            });
        }
    };

    let on_google = move |_| session.login_with_google();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Login"</h2>
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
                    {move || match notice.get() {
                        None => ().into_any(),
                        Some(Notice::Error(msg)) => {
                            view! { <div class="auth-notice auth-notice--error"><p>{msg}</p></div> }.into_any()
                        }
                        Some(Notice::NoPassword(msg)) => {
                            view! {
                                <div class="auth-notice auth-notice--info">
                                    <p>{msg}</p>
                                    <A href="/forgot-password">"Clique aqui para criar uma senha."</A>
                                </div>
                            }
                            .into_any()
                        }
                    }}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Entrando…" } else { "Entrar" }}
                    </button>
                </form>
                <button class="auth-button auth-button--google" type="button" on:click=on_google>
                    "Entrar com Google"
                </button>
                <div class="auth-links">
                    <A href="/register">"Criar conta"</A>
                    <A href="/forgot-password">"Esqueci minha senha"</A>
                </div>
            </div>
        </div>
    }
}
