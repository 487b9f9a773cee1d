// zkcurl-core/src/lib.rs
//! # zkcurl Core Library
//!
//! `zkcurl-core` turns a curl command line into a structured request and
//! decides which of its fields are safe to disclose. Fields whose source text
//! references a variable (`$NAME` or `${NAME}`) are private: their values are
//! kept out of any generated proof and only their names are ever persisted.
//!
//! The library is pure and synchronous. It performs no network or file I/O
//! apart from loading request profiles on request.
//!
//! ## Modules
//!
//! * `variables`: Scans a command line for variable references.
//! * `substitution`: Substitutes variable values into text and nested JSON values.
//! * `parser`: Extracts URL, method, headers and body with priority-ordered matchers.
//! * `classifier`: Splits headers and body into public and private parameter sets.
//! * `redaction`: Masking convention and log-safe rendering of private values.
//! * `execution`: Stored requests, the proof and text-generation boundaries, session records.
//! * `config`: YAML request profiles.
//! * `headless`: One-shot scan + parse + classify.
//!
//! ## Usage Example
//!
//! ```rust
//! use zkcurl_core::{prepare_request, Variables};
//!
//! let command = "curl -X POST https://api.example.com/x \
//!     -H 'Authorization: Bearer $TOKEN' -H 'Content-Type: application/json' -d '{\"a\":1}'";
//! let mut vars = Variables::new();
//! vars.insert("TOKEN".to_string(), "abc123".to_string());
//!
//! let prepared = prepare_request(command, &vars).unwrap();
//! assert_eq!(prepared.descriptor.method, "POST");
//! assert!(prepared.partition.private.headers.unwrap().contains_key("Authorization"));
//! assert!(prepared.partition.public.headers.unwrap().contains_key("Content-Type"));
//! ```
//!
//! ## Error Handling
//!
//! Parsing fails with [`CurlError::NoUrlFound`] when no request URL can be
//! recognised. Classification and substitution never fail.
//!
//! License: MIT OR Apache-2.0

pub mod classifier;
pub mod config;
pub mod errors;
pub mod execution;
pub mod headless;
pub mod parser;
pub mod redaction;
pub mod request;
pub mod substitution;
pub mod variables;

pub use classifier::classify;
pub use config::{merge_variables, RequestProfile};
pub use errors::CurlError;
pub use execution::{
    execute, generation_content, prepare_execution, ExecutionRequest, MessagesEndpoint,
    PrivateOptions, ProofClient, PublicOptions, SessionRecord, StoredRequest, TextGenerationClient,
};
pub use headless::{prepare_request, PreparedRequest};
pub use parser::parse;
pub use redaction::{mask_private, redact_sensitive, MaskedBody, MaskedParams, MASK};
pub use request::{
    HeaderMap, ParamSet, Partition, PrivateParamKeys, RequestDescriptor, Variables, DEFAULT_METHOD,
};
pub use substitution::{substitute, substitute_text};
pub use variables::{is_valid_variable_name, scan};
