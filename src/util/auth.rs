//! Route guard for screens that need a signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes wrap their content in [`RequireAuth`]. The decision is a
//! pure function of `(loading, authenticated, logged_out)` re-evaluated on
//! every session update, with `loading` taking precedence so protected content never
//! flashes before the first refresh resolves.
//!
//! An explicit logout from a protected view sends the user home rather than
//! to the login page. The marker is cleared when the next protected view
//! mounts, so later visits while signed out still go to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;

pub const LOGIN_ROUTE: &str = "/login";
/// Where an explicit logout lands.
pub const LOGOUT_ROUTE: &str = "/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// First refresh still pending: show a placeholder.
    Loading,
    Allow,
    /// The user just logged out from this view: follow them home.
    Leave,
    /// Settled and signed out: send to the login entry point.
    Redirect,
}

impl GuardDecision {
    /// Route to replace the current one with, if any.
    pub fn target(self) -> Option<&'static str> {
        match self {
            Self::Loading | Self::Allow => None,
            Self::Leave => Some(LOGOUT_ROUTE),
            Self::Redirect => Some(LOGIN_ROUTE),
        }
    }
}

pub fn guard_decision(state: &SessionState) -> GuardDecision {
    if state.loading {
        GuardDecision::Loading
    } else if state.is_authenticated() {
        GuardDecision::Allow
    } else if state.logged_out() {
        GuardDecision::Leave
    } else {
        GuardDecision::Redirect
    }
}

/// Replace-navigate whenever the decision settles signed out.
///
/// A logout and the logout handler both land on [`LOGOUT_ROUTE`], so the
/// order in which they navigate does not matter.
pub fn install_unauth_redirect<F>(decision: Memo<GuardDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = decision.get().target() {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Renders `children` only for an authenticated, settled session.
///
/// The view re-renders on decision changes only, so session writes that
/// keep the decision (a refresh bumping its epoch) do not remount children.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    if session.with_untracked(SessionState::logged_out) {
        session.update(SessionState::acknowledge_logout);
    }
    let decision = Memo::new(move |_| guard_decision(&session.get()));
    install_unauth_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Loading => view! { <p class="guard-placeholder">"Carregando…"</p> }.into_any(),
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Leave | GuardDecision::Redirect => {
            view! { <p class="guard-placeholder">"Redirecionando…"</p> }.into_any()
        }
    }
}
