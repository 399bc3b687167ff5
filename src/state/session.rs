//! Session store: who the current browser user is.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two identity channels exist: the server cookie session (authoritative,
//! confirmed through `GET /me`) and a legacy bearer token persisted in
//! `localStorage`. `refresh()` is the only place the cookie channel is
//! reconciled; the token path is kept behind the `legacy_bearer_token`
//! capability flag.
//!
//! State lives in a [`SessionCell`] (an `RwSignal` in the app) and is
//! provided to views through context together with the [`Session`] handle
//! that mutates it. Views only read.
//!
//! LIFECYCLE
//! =========
//! `loading=true` at startup → `restore()` once on mount → `loading=false`
//! with or without an identity. Afterwards only the operations below mutate
//! identity and token.
//!
//! ERROR HANDLING
//! ==============
//! `refresh()` is fail-closed: any failure to confirm identity means signed
//! out, and it never returns an error. `logout()` clears local state even if
//! the backend call fails.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api;
use crate::net::http::{ApiClient, ApiError, FetchTransport, Transport};
use crate::net::types::{AuthResponse, Credentials, Identity};
use crate::util::browser::{Browser, WebBrowser};

/// `localStorage` key holding the legacy bearer credential.
pub const TOKEN_STORAGE_KEY: &str = "jwt_token";
/// Where a successful password login or registration lands.
pub const POST_LOGIN_ROUTE: &str = "/profile";

pub const ACCOUNT_NO_PASSWORD: &str = "ACCOUNT_NO_PASSWORD";
const DEFAULT_NO_PASSWORD_MESSAGE: &str =
    "Sua conta foi criada via Google. Defina uma senha em “Esqueci minha senha”.";
const DEFAULT_LOGIN_ERROR: &str = "Ocorreu um erro no login.";

/// The client's belief about the current user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub credential_token: Option<String>,
    pub loading: bool,
    /// Bumped by every refresh start and sign-out; stale refreshes are ignored.
    epoch: u64,
    /// Signed out by an explicit logout that no protected view has seen yet.
    logged_out: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::pending()
    }
}

impl SessionState {
    /// Initial state before the first refresh resolves.
    pub fn pending() -> Self {
        Self { identity: None, credential_token: None, loading: true, epoch: 0, logged_out: false }
    }

    /// Settled state with a known identity (or none).
    pub fn resolved(identity: Option<Identity>) -> Self {
        Self { identity, loading: false, ..Self::pending() }
    }

    /// Derived: signed in through either channel.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some() || self.credential_token.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.email.as_str())
    }

    /// True right after `logout()`, until a sign-in or a protected view
    /// acknowledges it.
    pub fn logged_out(&self) -> bool {
        self.logged_out
    }

    /// A protected view mounted after the logout; later visits redirect to login.
    pub fn acknowledge_logout(&mut self) {
        self.logged_out = false;
    }

    fn begin_refresh(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    fn finish_refresh(&mut self, epoch: u64, identity: Option<Identity>) {
        if epoch == self.epoch {
            if identity.is_some() {
                self.logged_out = false;
            }
            self.identity = identity;
        } else {
            log::debug!("session: dropping stale refresh result (epoch {epoch}, now {})", self.epoch);
        }
        self.loading = false;
    }

    fn sign_out(&mut self) {
        self.epoch += 1;
        self.identity = None;
        self.credential_token = None;
        self.logged_out = true;
    }
}

/// Storage for [`SessionState`]: a reactive signal in the app, a plain cell in tests.
pub trait SessionCell {
    fn read(&self) -> SessionState;
    fn write(&self, f: impl FnOnce(&mut SessionState));
}

impl SessionCell for leptos::prelude::RwSignal<SessionState> {
    fn read(&self) -> SessionState {
        use leptos::prelude::GetUntracked;
        self.get_untracked()
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        use leptos::prelude::Update;
        self.update(f);
    }
}

/// Why a password login did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginFailure {
    /// Account was created through Google and has no password yet.
    #[error("{message}")]
    PasswordNotSet { message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("Não foi possível conectar. Tente novamente.")]
    Unreachable,
}

impl From<ApiError> for LoginFailure {
    fn from(err: ApiError) -> Self {
        if err.is_transport() {
            return Self::Unreachable;
        }
        if err.code() == Some(ACCOUNT_NO_PASSWORD) {
            let message = err.detail().unwrap_or(DEFAULT_NO_PASSWORD_MESSAGE).to_owned();
            return Self::PasswordNotSet { message };
        }
        let message = err
            .code()
            .or_else(|| err.detail())
            .unwrap_or(DEFAULT_LOGIN_ERROR)
            .to_owned();
        Self::Rejected(message)
    }
}

/// Handle over the session state plus the collaborators it needs.
#[derive(Clone)]
pub struct Session<C, T, B> {
    state: C,
    client: ApiClient<T>,
    browser: B,
}

/// The concrete session used by the running app.
pub type AppSession = Session<leptos::prelude::RwSignal<SessionState>, FetchTransport, WebBrowser>;

/// Session handle provided by `App`.
pub fn use_session() -> AppSession {
    leptos::prelude::expect_context::<AppSession>()
}

impl<C, T, B> Session<C, T, B>
where
    C: SessionCell,
    T: Transport + Clone,
    B: Browser,
{
    pub fn new(state: C, client: ApiClient<T>, browser: B) -> Self {
        Self { state, client, browser }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read()
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Client that also sends the legacy bearer token, when one is held.
    pub fn bearer_client(&self) -> ApiClient<T> {
        self.client.with_bearer(self.snapshot().credential_token.as_deref())
    }

    fn legacy_enabled(&self) -> bool {
        self.client.config().legacy_bearer_token
    }

    /// Startup: adopt a stored legacy token, then refresh once.
    pub async fn restore(&self) {
        if self.legacy_enabled() {
            if let Some(token) = self.browser.storage_get(TOKEN_STORAGE_KEY).filter(|t| !t.is_empty()) {
                self.state.write(|s| s.credential_token = Some(token));
            }
        }
        self.refresh().await;
    }

    /// Leave the SPA for the backend's Google OAuth entry point.
    pub fn login_with_google(&self) {
        let url = self.client.config().google_login_url();
        log::info!("session: redirecting to {url}");
        self.browser.redirect(&url);
    }

    /// Adopt a bearer credential. Synchronous, no network.
    pub fn login_with_token(&self, token: &str) {
        if !self.legacy_enabled() {
            log::warn!("session: bearer token ignored, legacy token login disabled");
            return;
        }
        let token = token.trim();
        if token.is_empty() {
            log::warn!("session: empty bearer token ignored");
            return;
        }
        self.browser.storage_set(TOKEN_STORAGE_KEY, token);
        let token = token.to_owned();
        self.state.write(|s| {
            s.credential_token = Some(token);
            s.logged_out = false;
        });
    }

    /// Re-read identity from `GET /me`. Never fails; always clears `loading`.
    pub async fn refresh(&self) {
        let mut epoch = 0;
        self.state.write(|s| epoch = s.begin_refresh());
        let identity = match api::fetch_me(&self.client).await {
            Ok(me) => me.into_identity(),
            Err(e) => {
                log::debug!("session: refresh failed, treating as signed out: {e}");
                None
            }
        };
        self.state.write(|s| s.finish_refresh(epoch, identity));
    }

    /// Best-effort backend logout, then unconditional local sign-out.
    pub async fn logout(&self) {
        if let Err(e) = api::logout(&self.client).await {
            log::warn!("session: backend logout failed, clearing locally: {e}");
        }
        self.browser.storage_remove(TOKEN_STORAGE_KEY);
        self.state.write(SessionState::sign_out);
    }

    /// Email/password login followed by a refresh.
    ///
    /// Returns the route to continue to.
    ///
    /// # Errors
    ///
    /// [`LoginFailure`] describing what the view should show; the session is
    /// left untouched.
    pub async fn login_with_password(&self, email: &str, password: &str) -> Result<&'static str, LoginFailure> {
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };
        let response = api::login(&self.client, &credentials).await?;
        Ok(self.complete_sign_in(response).await)
    }

    /// Account creation followed by a refresh.
    ///
    /// # Errors
    ///
    /// The backend's normalized [`ApiError`].
    pub async fn register(&self, email: &str, password: &str) -> Result<&'static str, ApiError> {
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };
        let response = api::register(&self.client, &credentials).await?;
        Ok(self.complete_sign_in(response).await)
    }

    async fn complete_sign_in(&self, response: AuthResponse) -> &'static str {
        if let Some(token) = response.token.as_deref() {
            self.login_with_token(token);
        }
        self.refresh().await;
        POST_LOGIN_ROUTE
    }
}
