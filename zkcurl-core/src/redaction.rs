// zkcurl-core/src/redaction.rs
//! Masking and log-safety helpers for private request parameters.
//!
//! Private values never leave the process in clear form: the presentation
//! side receives them masked with [`MASK`], the persistence side only sees
//! their key names (see [`crate::request::PrivateParamKeys`]), and debug logs
//! go through [`redact_sensitive`] unless `ZKCURL_ALLOW_DEBUG_PII=true`.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::request::ParamSet;

/// Marker shown in place of every private value.
pub const MASK: &str = "***";

lazy_static! {
    /// Whether sensitive values may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("ZKCURL_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A private parameter set with every value replaced by [`MASK`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<MaskedBody>,
}

/// A masked body keeps the key names of a JSON object and hides everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaskedBody {
    Fields(BTreeMap<String, String>),
    Opaque(String),
}

/// Masks every value of a private parameter set for display.
pub fn mask_private(private: &ParamSet) -> MaskedParams {
    let headers = private.headers.as_ref().map(|h| {
        h.keys()
            .map(|k| (k.clone(), MASK.to_string()))
            .collect::<BTreeMap<_, _>>()
    });
    let body = private.body.as_ref().map(|b| match b {
        Value::Object(map) => MaskedBody::Fields(
            map.keys().map(|k| (k.clone(), MASK.to_string())).collect(),
        ),
        _ => MaskedBody::Opaque(MASK.to_string()),
    });
    MaskedParams { headers, body }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_substitution_debug(module_path: &str, variable: &str, value: &str) {
    debug!(
        "{} Substituting variable '{}' with '{}'",
        module_path,
        variable,
        get_loggable_content(value)
    );
}

pub fn log_classification_debug(module_path: &str, field: &str, is_private: bool) {
    debug!(
        "{} Classified '{}' as {}",
        module_path,
        field,
        if is_private { "private" } else { "public" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn mask_hides_header_values_and_body_fields() {
        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), "Bearer abc123".to_string());
        let private = ParamSet {
            headers: Some(headers),
            body: Some(json!({"password": "hunter2"})),
        };
        let masked = mask_private(&private);
        assert_eq!(masked.headers.unwrap()["Authorization"], MASK);
        match masked.body.unwrap() {
            MaskedBody::Fields(fields) => assert_eq!(fields["password"], MASK),
            other => panic!("unexpected masked body: {:?}", other),
        }
    }

    #[test]
    fn mask_raw_body_is_opaque() {
        let private = ParamSet {
            headers: None,
            body: Some(json!("token=secret")),
        };
        let masked = mask_private(&private);
        assert!(masked.headers.is_none());
        assert_eq!(masked.body, Some(MaskedBody::Opaque(MASK.to_string())));
        let rendered = serde_json::to_string(&masked).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
