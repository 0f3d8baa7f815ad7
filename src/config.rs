//! Build-time environment configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so values are baked in at
//! build time via `option_env!`. Validation runs once in the entry point and a
//! failure aborts initialization before any component mounts.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use url::Url;

pub const API_URL_VAR: &str = "API_URL";
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const MAPBOX_TOKEN_VAR: &str = "MAPBOX_TOKEN";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {var}")]
    Missing { var: &'static str },

    #[error("environment variable {var} is empty")]
    Empty { var: &'static str },

    #[error("environment variable {var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the property API.
    pub api_url: Url,
    /// Backend service (auth provider) URL.
    pub supabase_url: Url,
    /// Public key for the backend service.
    pub supabase_anon_key: String,
    /// Access token for the map tile provider.
    pub mapbox_token: String,
}

impl AppConfig {
    /// Build config from a key lookup.
    ///
    /// # Errors
    ///
    /// Returns the first missing, empty or malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_url: required_url(&lookup, API_URL_VAR)?,
            supabase_url: required_url(&lookup, SUPABASE_URL_VAR)?,
            supabase_anon_key: required(&lookup, SUPABASE_ANON_KEY_VAR)?,
            mapbox_token: required(&lookup, MAPBOX_TOKEN_VAR)?,
        })
    }

    /// Build config from values captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            let value = match key {
                API_URL_VAR => option_env!("API_URL"),
                SUPABASE_URL_VAR => option_env!("SUPABASE_URL"),
                SUPABASE_ANON_KEY_VAR => option_env!("SUPABASE_ANON_KEY"),
                MAPBOX_TOKEN_VAR => option_env!("MAPBOX_TOKEN"),
                _ => None,
            };
            value.map(str::to_owned)
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var).ok_or(ConfigError::Missing { var })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty { var });
    }
    Ok(trimmed.to_owned())
}

fn required_url<F>(lookup: &F, var: &'static str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = required(lookup, var)?;
    let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl { var, reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl { var, reason: format!("unsupported scheme '{}'", url.scheme()) });
    }
    Ok(url)
}
