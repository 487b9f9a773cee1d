// zkcurl-core/src/headless.rs

//! `headless.rs`
//! One-shot pipeline for non-interactive callers: scan, parse and classify a
//! command line in a single call.
//!
//! The original text and the substituted descriptor are kept side by side in
//! [`PreparedRequest`]; neither is derived from the other in place.

use crate::classifier::classify;
use crate::errors::CurlError;
use crate::parser::parse;
use crate::request::{Partition, RequestDescriptor, Variables};
use crate::variables::scan;

/// The artifacts produced for one command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// The command line exactly as the user wrote it.
    pub original: String,
    /// The descriptor parsed from the substituted command line.
    pub descriptor: RequestDescriptor,
    /// Public/private split decided against `original`.
    pub partition: Partition,
    /// Variable names referenced by `original`, in first-occurrence order.
    pub variables: Vec<String>,
}

impl PreparedRequest {
    /// Referenced variables that have no value in `variables`.
    pub fn missing_variables(&self, variables: &Variables) -> Vec<String> {
        self.variables
            .iter()
            .filter(|name| !variables.contains_key(name.as_str()))
            .cloned()
            .collect()
    }
}

/// Scans, parses and classifies `command_line` in one call.
///
/// # Arguments
///
/// * `command_line` - The raw curl invocation, before substitution.
/// * `variables` - Values used to materialise the descriptor.
pub fn prepare_request(command_line: &str, variables: &Variables) -> Result<PreparedRequest, CurlError> {
    let descriptor = parse(command_line, variables)?;
    let partition = classify(&descriptor, command_line);

    Ok(PreparedRequest {
        original: command_line.to_string(),
        descriptor,
        partition,
        variables: scan(command_line),
    })
}
