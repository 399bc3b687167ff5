//! Test doubles shared by unit tests across modules.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::config::ClientConfig;
use crate::net::http::{ApiClient, ApiError, HttpRequest, HttpResponse, Transport};
use crate::state::session::{Session, SessionCell, SessionState};
use crate::util::browser::Browser;

pub type TestSession = Session<RefCell<SessionState>, MockTransport, MemoryBrowser>;

/// Pending session wired to the given doubles and config.
pub fn test_session(mock: &MockTransport, browser: &MemoryBrowser, config: ClientConfig) -> TestSession {
    Session::new(
        RefCell::new(SessionState::pending()),
        ApiClient::new(mock.clone(), config),
        browser.clone(),
    )
}

impl SessionCell for RefCell<SessionState> {
    fn read(&self) -> SessionState {
        self.borrow().clone()
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.borrow_mut());
    }
}

// =============================================================
// MockTransport
// =============================================================

/// Scripted transport: replies are consumed in order, requests are recorded.
///
/// Clones share the same script and log.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn reply_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.reply(status, &body.to_string())
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Err(ApiError::Transport(message.to_owned())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn client(&self) -> ApiClient<MockTransport> {
        ApiClient::new(self.clone(), ClientConfig::default())
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_owned())))
    }
}

// =============================================================
// MemoryBrowser
// =============================================================

/// In-memory localStorage plus a log of full-page redirects.
#[derive(Clone, Default)]
pub struct MemoryBrowser {
    storage: Arc<Mutex<HashMap<String, String>>>,
    redirects: Arc<Mutex<Vec<String>>>,
}

impl MemoryBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let browser = Self::default();
        browser.storage.lock().unwrap().insert(key.to_owned(), value.to_owned());
        browser
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.storage.lock().unwrap().get(key).cloned()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Browser for MemoryBrowser {
    fn storage_get(&self, key: &str) -> Option<String> {
        self.item(key)
    }

    fn storage_set(&self, key: &str, value: &str) {
        self.storage.lock().unwrap().insert(key.to_owned(), value.to_owned());
    }

    fn storage_remove(&self, key: &str) {
        self.storage.lock().unwrap().remove(key);
    }

    fn redirect(&self, url: &str) {
        self.redirects.lock().unwrap().push(url.to_owned());
    }
}
