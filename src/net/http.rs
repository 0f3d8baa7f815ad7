//! Request/response model and the transport seam.
//!
//! DESIGN
//! ======
//! [`Transport`] performs exactly one HTTP exchange and reports every status
//! code as `Ok`; only failures to get a response at all (network, timeout)
//! are errors. Status interpretation, auth and retries live in `api` so they
//! are testable with a scripted transport.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::ErrorBody;

/// Per-request timeout. Elapsing counts as a network error.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Message shown when a failure carries no server-provided text.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

pub const AUTHORIZATION: &str = "Authorization";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), headers: Vec::new(), body: None }
    }

    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self { method: Method::Post, url: url.into(), headers: Vec::new(), body: Some(body) }
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Insert or replace a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }

    pub fn set_bearer(&mut self, token: &str) {
        self.set_header(AUTHORIZATION, format!("Bearer {token}"));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// [`ApiError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `message` from a JSON error body, if any.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }

    /// Map non-2xx responses to [`ApiError::Status`].
    ///
    /// # Errors
    ///
    /// Any status outside `200..300`.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status { status: self.status, message: self.error_message() })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {REQUEST_TIMEOUT_MS} ms")]
    Timeout,

    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("session could not be refreshed: {0}")]
    Auth(String),

    #[error("response could not be decoded: {0}")]
    Decode(String),

    #[error("request could not be built: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Text for the user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message: Some(message), .. } => message.clone(),
            _ => DEFAULT_ERROR_MESSAGE.to_owned(),
        }
    }
}

/// One HTTP exchange.
#[async_trait(?Send)]
pub trait Transport {
    /// Send `request` and return whatever response arrives.
    ///
    /// # Errors
    ///
    /// Only when no response was received ([`ApiError::Network`],
    /// [`ApiError::Timeout`]) or the request could not be built.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Browser `fetch` via `gloo-net`, raced against [`REQUEST_TIMEOUT_MS`]; a
/// request that loses the race is aborted.
/// Off-browser every request fails as a network error.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[cfg(feature = "csr")]
impl GlooTransport {
    async fn exchange(request: &ApiRequest, signal: Option<&web_sys::AbortSignal>) -> Result<ApiResponse, ApiError> {
        use gloo_net::http::RequestBuilder;

        let mut builder = match request.method {
            Method::Get => RequestBuilder::new(&request.url).method(gloo_net::http::Method::GET),
            Method::Post => RequestBuilder::new(&request.url).method(gloo_net::http::Method::POST),
        };
        builder = builder.abort_signal(signal);
        builder = builder.header("Content-Type", "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = built.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(feature = "csr")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let controller = match web_sys::AbortController::new() {
            Ok(controller) => Some(controller),
            Err(e) => {
                log::warn!("http: no AbortController, timed out requests keep running: {e:?}");
                None
            }
        };
        let signal = controller.as_ref().map(web_sys::AbortController::signal);

        let exchange = Self::exchange(request, signal.as_ref());
        let deadline = gloo_timers::future::TimeoutFuture::new(REQUEST_TIMEOUT_MS);
        with_deadline(exchange, deadline, || {
            log::warn!("http: {} timed out", request.url);
            if let Some(controller) = &controller {
                controller.abort();
            }
        })
        .await
    }
}

/// Race `exchange` against `deadline`. When the deadline wins, `on_expire`
/// runs (the browser transport aborts the fetch there) and the result is
/// [`ApiError::Timeout`].
#[cfg(any(feature = "csr", test))]
pub(crate) async fn with_deadline<E, D>(exchange: E, deadline: D, on_expire: impl FnOnce()) -> Result<ApiResponse, ApiError>
where
    E: std::future::Future<Output = Result<ApiResponse, ApiError>>,
    D: std::future::Future<Output = ()>,
{
    use futures::future::{Either, select};

    match select(Box::pin(exchange), Box::pin(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            on_expire();
            Err(ApiError::Timeout)
        }
    }
}

#[cfg(not(feature = "csr"))]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        Err(ApiError::Network(format!("{}: fetch is only available in the browser", request.url)))
    }
}
