//! JSON-over-HTTP client used by every backend call.
//!
//! DESIGN
//! ======
//! `Transport` is the only seam that touches the network. `FetchTransport`
//! drives the browser `fetch` API through `gloo-net`; tests swap in a mock.
//! `ApiClient` layers the base URL, credentials, JSON encoding and error
//! normalization on top, so callers only ever see a parsed payload or one
//! `ApiError`.
//!
//! ERROR HANDLING
//! ==============
//! The body is parsed as JSON regardless of status. Non-2xx responses become
//! `ApiError::Status` with the body's `error` field (then `message`) as the
//! message, else `HTTP <status>`. Nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A fully resolved request handed to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// Send cookies cross-origin (`credentials: include`).
    pub with_credentials: bool,
}

/// Raw status and body text as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors surfaced by [`ApiClient`]. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response: network down, CORS rejection, aborted fetch.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx status, with or without a structured error body.
    #[error("{message}")]
    Status {
        status: u16,
        /// Machine-readable `error` field of the body, when present.
        code: Option<String>,
        message: String,
        /// Human-readable `message` field of the body, when present.
        detail: Option<String>,
    },
    /// 2xx response whose body does not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Request body could not be serialized.
    #[error("invalid request body: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Status { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Network seam. Browser futures are not `Send`, hence `?Send`.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    /// Perform one HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `fetch`-backed transport. Outside the browser every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as FetchMethod, RequestBuilder};
            use web_sys::RequestCredentials;

            let method = match request.method {
                Method::Get => FetchMethod::GET,
                Method::Post => FetchMethod::POST,
                Method::Put => FetchMethod::PUT,
                Method::Delete => FetchMethod::DELETE,
            };
            let credentials = if request.with_credentials {
                RequestCredentials::Include
            } else {
                RequestCredentials::SameOrigin
            };
            let mut builder = RequestBuilder::new(&request.url).method(method).credentials(credentials);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let prepared = match request.body {
                Some(body) => builder.body(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let response = prepared
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}

/// Per-call options mirroring `fetch` init fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub with_credentials: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::Get, body: None, headers: Vec::new(), with_credentials: true }
    }
}

/// Backend client bound to one API base.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    config: Arc<ClientConfig>,
    bearer: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config: Arc::new(config), bearer: None }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Copy of this client that sends `Authorization: Bearer <token>`.
    ///
    /// `None` yields a client without the header.
    #[must_use]
    pub fn with_bearer(&self, token: Option<&str>) -> Self
    where
        T: Clone,
    {
        Self {
            transport: self.transport.clone(),
            config: Arc::clone(&self.config),
            bearer: token.filter(|t| !t.is_empty()).map(str::to_owned),
        }
    }

    /// Issue a request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiError`] for the failure taxonomy.
    pub async fn request<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R, ApiError> {
        let request = self.build_request(path, options)?;
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await.inspect_err(|e| {
            log::warn!("http: {method:?} {url} failed: {e}");
        })?;
        if !response.is_success() {
            log::debug!("http: {method:?} {url} -> {}", response.status);
        }
        interpret_response(&response)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(path, RequestOptions::default()).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = encode_body(body)?;
        self.request(path, RequestOptions { method: Method::Post, body: Some(body), ..RequestOptions::default() })
            .await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let body = encode_body(body)?;
        self.request(path, RequestOptions { method: Method::Put, body: Some(body), ..RequestOptions::default() })
            .await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(path, RequestOptions { method: Method::Delete, ..RequestOptions::default() })
            .await
    }

    fn build_request(&self, path: &str, options: RequestOptions) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(token) = &self.bearer {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        // Caller headers win over defaults with the same name.
        for (name, value) in options.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }
        let body = match options.body {
            Some(Value::Null) | None => None,
            Some(value) => Some(serde_json::to_string(&value).map_err(|e| ApiError::Encode(e.to_string()))?),
        };
        Ok(HttpRequest {
            method: options.method,
            url: self.config.url(path),
            headers,
            body,
            with_credentials: options.with_credentials,
        })
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Turn a raw response into a decoded payload or a normalized error.
///
/// # Errors
///
/// [`ApiError::Status`] for non-2xx, [`ApiError::Decode`] for a 2xx body of
/// the wrong shape.
pub fn interpret_response<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    let parsed = parse_body(&response.body);
    if !response.is_success() {
        return Err(status_error(response.status, parsed.as_ref()));
    }
    serde_json::from_value(parsed.unwrap_or(Value::Null)).map_err(|e| ApiError::Decode(e.to_string()))
}

fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str(body).ok()
}

/// Build the normalized error for a non-2xx status.
pub fn status_error(status: u16, body: Option<&Value>) -> ApiError {
    let field = |name: &str| {
        body.and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };
    let code = field("error");
    let detail = field("message");
    let message = code
        .clone()
        .or_else(|| detail.clone())
        .unwrap_or_else(|| format!("HTTP {status}"));
    ApiError::Status { status, code, message, detail }
}
