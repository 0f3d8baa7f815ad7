//! Wall-clock timestamps.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Current time as an RFC 3339 / ISO-8601 string in UTC.
pub fn now_iso8601() -> String {
    #[cfg(feature = "csr")]
    {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
    }
}

/// Parse an RFC 3339 timestamp, `None` when malformed.
pub fn parse_iso8601(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339).ok()
}
