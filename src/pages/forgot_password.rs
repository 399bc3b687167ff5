//! Request a password-reset e-mail.
//!
//! The success message never reveals whether the address is registered.

use leptos::prelude::*;

use crate::net::api;
use crate::state::session::use_session;
use crate::util::scope::ViewScope;

const SENT_MESSAGE: &str = "Se o e-mail existir, você receberá um link para redefinir a senha.";
const SEND_FAILED: &str = "Não foi possível enviar o e-mail. Tente novamente.";

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let session = use_session();
    let scope = ViewScope::for_view();

    let email = RwSignal::new(String::new());
    let sent = RwSignal::new(false);
    let error = RwSignal::new(None::<&'static str>);
    let busy = RwSignal::new(false);

    let on_submit = Callback::new(move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked().trim().to_owned();
        if email_value.is_empty() {
            error.set(Some("Informe o e-mail."));
            return;
        }
        error.set(None);
        busy.set(true);
        let session = session.clone();
        scope.spawn(async move {
            match api::forgot_password(session.client(), &email_value).await {
                Ok(()) => sent.set(true),
                Err(e) => {
                    log::warn!("forgot-password: {e}");
                    error.set(Some(SEND_FAILED));
                }
            }
            busy.set(false);
        });
    });

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Recuperar senha"</h2>
                <Show
                    when=move || !sent.get()
                    fallback=|| view! { <div class="auth-notice auth-notice--success">{SENT_MESSAGE}</div> }
                >
                    <form class="auth-form" on:submit=move |ev| on_submit.run(ev)>
                        <label class="auth-label" for="email">"Email"</label>
                        <input
                            id="email"
                            class="auth-input"
                            type="email"
                            required=true
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        {move || error.get().map(|msg| view! { <div class="auth-notice auth-notice--error">{msg}</div> })}
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Enviando…" } else { "Enviar link" }}
                        </button>
                    </form>
                </Show>
            </div>
        </div>
    }
}
