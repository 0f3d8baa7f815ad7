use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

fn complete() -> Vec<(&'static str, &'static str)> {
    vec![
        (API_URL_VAR, "https://api.wealthmap.test/v1/"),
        (SUPABASE_URL_VAR, "https://project.supabase.co"),
        (SUPABASE_ANON_KEY_VAR, "anon-key"),
        (MAPBOX_TOKEN_VAR, "pk.abc"),
    ]
}

fn without(var: &str) -> Vec<(&'static str, &'static str)> {
    complete().into_iter().filter(|(k, _)| *k != var).collect()
}

fn with(var: &'static str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    let mut pairs = without(var);
    pairs.push((var, value));
    pairs
}

#[test]
fn complete_config_parses() {
    let cfg = AppConfig::from_lookup(lookup_from(&complete())).unwrap();
    assert_eq!(cfg.api_url.as_str(), "https://api.wealthmap.test/v1/");
    assert_eq!(cfg.supabase_url.host_str(), Some("project.supabase.co"));
    assert_eq!(cfg.supabase_anon_key, "anon-key");
    assert_eq!(cfg.mapbox_token, "pk.abc");
}

#[test]
fn each_missing_value_is_reported() {
    for var in [API_URL_VAR, SUPABASE_URL_VAR, SUPABASE_ANON_KEY_VAR, MAPBOX_TOKEN_VAR] {
        let err = AppConfig::from_lookup(lookup_from(&without(var))).unwrap_err();
        assert_eq!(err, ConfigError::Missing { var });
    }
}

#[test]
fn blank_values_are_rejected() {
    let err = AppConfig::from_lookup(lookup_from(&with(MAPBOX_TOKEN_VAR, "   "))).unwrap_err();
    assert_eq!(err, ConfigError::Empty { var: MAPBOX_TOKEN_VAR });
}

#[test]
fn malformed_url_is_rejected() {
    let err = AppConfig::from_lookup(lookup_from(&with(API_URL_VAR, "not a url"))).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { var: API_URL_VAR, .. }));
}

#[test]
fn non_http_scheme_is_rejected() {
    let err = AppConfig::from_lookup(lookup_from(&with(SUPABASE_URL_VAR, "ftp://files.example.com"))).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { var: SUPABASE_URL_VAR, .. }));
    assert!(err.to_string().contains("SUPABASE_URL"));
}

#[test]
fn values_are_trimmed() {
    let cfg = AppConfig::from_lookup(lookup_from(&with(SUPABASE_ANON_KEY_VAR, "  key  "))).unwrap();
    assert_eq!(cfg.supabase_anon_key, "key");
}
