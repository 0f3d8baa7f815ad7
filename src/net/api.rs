//! Authenticated API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request carries `Authorization: Bearer <token>` from local storage
//! when a token exists. A 401 on a first attempt triggers exactly one refresh
//! (`POST {api}/auth/refresh`) and one retry with the new token; a failed
//! refresh sends the user to the login page. Every failure that reaches the
//! caller has already been shown to the user as an error toast.
//!
//! ERROR HANDLING
//! ==============
//! The retry is a loop guarded by a `retried` flag rather than a recursive
//! call, so a second 401 always falls through to the caller.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use leptos::prelude::RwSignal;
use url::Url;

use super::http::{ApiError, ApiRequest, ApiResponse, GlooTransport, Transport};
use super::types::{Property, RefreshRequest, RefreshResponse};
use crate::config::AppConfig;
use crate::state::filters::FilterState;
use crate::state::toast::ToastState;
use crate::util::navigate::{BrowserNavigator, LOGIN_PATH, Navigator};
use crate::util::notify::Notifier;
use crate::util::storage::{BrowserStorage, KeyValueStore};

/// Storage key of the access token.
pub const TOKEN_KEY: &str = "wealthmap_token";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "wealthmap_refresh_token";

pub const REFRESH_PATH: &str = "/auth/refresh";
pub const PROPERTIES_PATH: &str = "/properties";

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    transport: Rc<dyn Transport>,
    store: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
    navigator: Rc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: &Url,
        transport: Rc<dyn Transport>,
        store: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let base = base_url.as_str().trim_end_matches('/').to_owned();
        Self { base, transport, store, notifier, navigator }
    }

    /// Client wired to `fetch`, `localStorage`, the toast stack and
    /// `window.location`.
    pub fn browser(config: &AppConfig, toasts: RwSignal<ToastState>) -> Self {
        Self::new(
            &config.api_url,
            Rc::new(GlooTransport),
            Rc::new(BrowserStorage),
            Rc::new(toasts),
            Rc::new(BrowserNavigator),
        )
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Fetch properties matching `filters`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; the user has already been notified.
    pub async fn fetch_properties(&self, filters: &FilterState) -> Result<Vec<Property>, ApiError> {
        let url = self.properties_url(filters)?;
        let response = self.execute(ApiRequest::get(url)).await?;
        response.json::<Vec<Property>>().inspect_err(|e| {
            log::error!("api: {PROPERTIES_PATH}: {e}");
            self.notifier.error(&e.user_message());
        })
    }

    fn properties_url(&self, filters: &FilterState) -> Result<String, ApiError> {
        let base = self.url(PROPERTIES_PATH);
        let pairs = filters.query_pairs();
        if pairs.is_empty() {
            return Ok(base);
        }
        Url::parse_with_params(&base, pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .map(String::from)
            .map_err(|e| ApiError::Encode(e.to_string()))
    }

    /// Run `request` through auth injection, refresh-and-retry and error
    /// notification.
    ///
    /// # Errors
    ///
    /// The request's own failure. A failed refresh redirects to the login
    /// page and still returns the original error.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut retried = false;
        let mut fresh_token: Option<String> = None;
        loop {
            if let Some(token) = fresh_token.clone().or_else(|| self.read_token(TOKEN_KEY)) {
                request.set_bearer(&token);
            }

            let err = match self.transport.send(&request).await.and_then(ApiResponse::error_for_status) {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };

            if err.is_unauthorized() && !retried {
                retried = true;
                match self.refresh().await {
                    Ok(token) => {
                        log::info!("api: session refreshed, retrying {}", request.url);
                        fresh_token = Some(token);
                        continue;
                    }
                    Err(refresh_err) => {
                        log::warn!("api: {refresh_err}; redirecting to {LOGIN_PATH}");
                        self.navigator.redirect(LOGIN_PATH);
                    }
                }
            }

            log::error!("api: {} failed: {err}", request.url);
            self.notifier.error(&err.user_message());
            return Err(err);
        }
    }

    /// Exchange the stored refresh token for a new access token and persist it.
    async fn refresh(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .read_token(REFRESH_TOKEN_KEY)
            .ok_or_else(|| ApiError::Auth("no refresh token stored".to_owned()))?;
        let body = serde_json::to_value(RefreshRequest { refresh_token: &refresh_token })
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = self
            .transport
            .send(&ApiRequest::post_json(self.url(REFRESH_PATH), body))
            .await
            .and_then(ApiResponse::error_for_status)
            .map_err(|e| ApiError::Auth(e.to_string()))?;
        let RefreshResponse { token } = response.json::<RefreshResponse>().map_err(|e| ApiError::Auth(e.to_string()))?;

        if let Err(e) = self.store.set(TOKEN_KEY, &token) {
            log::warn!("api: refreshed token not persisted: {e}");
        }
        Ok(token)
    }

    fn read_token(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::debug!("api: {key} unreadable: {e}");
                None
            }
        }
    }
}
