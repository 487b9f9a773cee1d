//! errors.rs - Custom error types for the zkcurl-core library.
//!
//! Parsing failures are typed so callers can tell a command line with no
//! recognisable URL apart from I/O or profile problems. Classification and
//! substitution are total and never produce an error.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by `zkcurl-core`.
///
/// Messages never include substituted variable values, so they are safe to
/// show to the user as-is.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CurlError {
    #[error("no URL found: could not recognise a request URL in the command line")]
    NoUrlFound,

    #[error("Invalid request profile: {0}")]
    Profile(String),

    #[error("Proof client failed to execute the request: {0}")]
    Execution(String),

    #[error("stored request has no prompt for the text-generation step")]
    MissingPrompt,

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("Failed to (de)serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
