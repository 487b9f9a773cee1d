// zkcurl-core/src/classifier.rs
//! Sensitivity classifier.
//!
//! Splits the headers and body of a parsed request into a public and a
//! private [`ParamSet`]. A field is private when the clause that produced it
//! in the *original*, unsubstituted command line contains a `$`. The resolved
//! values play no part in the decision.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde_json::Value;

use crate::parser::patterns::{BODY_MATCHERS, HEADER_CLAUSE};
use crate::redaction::log_classification_debug;
use crate::request::{HeaderMap, ParamSet, Partition, RequestDescriptor};

/// Partitions `descriptor` into public and private parameters using
/// `original` (the command line before substitution) as the source of truth.
///
/// Every header and the body, when present, land in exactly one of the two
/// sets. Empty fields are omitted rather than left as empty placeholders.
pub fn classify(descriptor: &RequestDescriptor, original: &str) -> Partition {
    let mut public_headers = HeaderMap::new();
    let mut private_headers = HeaderMap::new();

    for (name, value) in &descriptor.headers {
        let is_private = header_references_variable(name, original);
        log_classification_debug(module_path!(), name, is_private);
        if is_private {
            private_headers.insert(name.clone(), value.clone());
        } else {
            public_headers.insert(name.clone(), value.clone());
        }
    }

    let mut public = ParamSet {
        headers: non_empty(public_headers),
        body: None,
    };
    let mut private = ParamSet {
        headers: non_empty(private_headers),
        body: None,
    };

    if let Some(raw) = &descriptor.body {
        let is_private = body_references_variable(original);
        log_classification_debug(module_path!(), "body", is_private);
        let body = structured_body(raw);
        if is_private {
            private.body = Some(body);
        } else {
            public.body = Some(body);
        }
    }

    Partition { public, private }
}

/// True when any `-H`/`--header` clause for `name` in `original` carries a `$`.
///
/// Names compare case-insensitively. A header with no clause of its own in
/// `original` was produced by substitution and counts as private.
pub fn header_references_variable(name: &str, original: &str) -> bool {
    let mut found = false;
    for (clause_name, value) in header_clauses(original) {
        if !clause_name.eq_ignore_ascii_case(name) {
            continue;
        }
        if value.contains('$') {
            return true;
        }
        found = true;
    }
    if !found {
        debug!("Header '{}' has no clause in the original command line; treating it as private.", name);
    }
    !found
}

fn header_clauses(text: &str) -> impl Iterator<Item = (&str, &str)> {
    HEADER_CLAUSE.captures_iter(text).filter_map(|caps| {
        let (name, value) = match (caps.get(1), caps.get(2)) {
            (Some(name), Some(value)) => (name, value),
            _ => (caps.get(3)?, caps.get(4)?),
        };
        Some((name.as_str().trim(), value.as_str()))
    })
}

/// True when the data clause in `original` carries a `$`.
///
/// The clause is located with the same priority list the extractor uses, so
/// the clause inspected here is the one the body was taken from.
pub fn body_references_variable(original: &str) -> bool {
    BODY_MATCHERS
        .iter()
        .find_map(|m| m.capture(original))
        .is_some_and(|clause| clause.contains('$'))
}

/// Parses `raw` as JSON, falling back to the raw string.
pub fn structured_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn non_empty(headers: HeaderMap) -> Option<HeaderMap> {
    if headers.is_empty() { None } else { Some(headers) }
}
