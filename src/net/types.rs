//! Wire DTOs for the property API.
//!
//! DESIGN
//! ======
//! The API is loosely typed: ids arrive as strings or numbers and `value` may
//! be missing or null. Deserializers normalize both here so the rest of the
//! client works with one shape.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use mapview::marker::MarkerPoint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A property record as returned by `GET /properties`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique property identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Assessed value in dollars. Missing or null is treated as 0.
    #[serde(default, deserialize_with = "deserialize_value_or_zero")]
    pub value: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_net_worth: Option<f64>,
    /// Living area in square feet.
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub property_type: Option<String>,
}

impl Property {
    /// Heading for the details panel; falls back to the id.
    pub fn display_title(&self) -> &str {
        self.address.as_deref().filter(|a| !a.trim().is_empty()).unwrap_or(&self.id)
    }
}

impl From<&Property> for MarkerPoint {
    fn from(p: &Property) -> Self {
        Self { id: p.id.clone(), lat: p.latitude, lng: p.longitude, value: p.value }
    }
}

/// Error body shape. Only `message` is consumed.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /auth/refresh` request.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// `POST /auth/refresh` response. Accepts `token` or `accessToken`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

fn deserialize_value_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
