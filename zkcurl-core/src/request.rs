// zkcurl-core/src/request.rs
//! Core data structures shared by the parser, the classifier and the
//! execution boundary.
//!
//! Every value here is built once and never mutated afterwards; each
//! transformation in the pipeline returns a fresh value.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Variable name to value mapping used for substitution.
///
/// A `BTreeMap` keeps the substitution order deterministic.
pub type Variables = BTreeMap<String, String>;

/// Header name to header value mapping. Keys are compared case-sensitively.
pub type HeaderMap = BTreeMap<String, String>;

/// HTTP method used when a command line carries no `-X`/`--request` flag.
pub const DEFAULT_METHOD: &str = "GET";

/// The structured result of parsing a command-line request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: HeaderMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// One side of a public/private split.
///
/// A field with nothing in it is `None` rather than an empty placeholder, so
/// "has a private body" is a presence check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ParamSet {
    pub fn is_empty(&self) -> bool {
        self.headers.is_none() && self.body.is_none()
    }

    /// Header names in this set, in map order.
    pub fn header_names(&self) -> Vec<String> {
        self.headers
            .as_ref()
            .map(|h| h.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// The public and private parameter sets derived from one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    pub public: ParamSet,
    pub private: ParamSet,
}

/// Names of the private fields, without their values.
///
/// This is the only trace of private parameters that may be persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateParamKeys {
    pub headers: Vec<String>,
    pub body: Vec<String>,
}

impl PrivateParamKeys {
    /// Collects the private header names and, for a JSON object body, its
    /// top-level keys. Any other body shape contributes no key names.
    pub fn from_params(private: &ParamSet) -> Self {
        let body = match &private.body {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };
        Self {
            headers: private.header_names(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_defaults_to_get() {
        let d = RequestDescriptor::new("https://example.com");
        assert_eq!(d.method, "GET");
        assert!(d.headers.is_empty());
        assert!(d.body.is_none());
    }

    #[test]
    fn empty_param_set_serializes_without_keys() {
        let set = ParamSet::default();
        assert_eq!(serde_json::to_string(&set).unwrap(), "{}");
        assert!(set.is_empty());
    }

    #[test]
    fn private_keys_from_object_body() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization".to_string(), "Bearer x".to_string());
        let set = ParamSet {
            headers: Some(headers),
            body: Some(json!({"password": "p", "user": "u"})),
        };
        let keys = PrivateParamKeys::from_params(&set);
        assert_eq!(keys.headers, vec!["Authorization".to_string()]);
        assert_eq!(keys.body, vec!["password".to_string(), "user".to_string()]);
    }

    #[test]
    fn private_keys_ignore_scalar_body() {
        let set = ParamSet {
            headers: None,
            body: Some(json!("raw secret")),
        };
        let keys = PrivateParamKeys::from_params(&set);
        assert!(keys.headers.is_empty());
        assert!(keys.body.is_empty());
    }
}
