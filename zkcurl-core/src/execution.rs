// zkcurl-core/src/execution.rs
//! Boundary with the proof-generation collaborator.
//!
//! A [`StoredRequest`] is what gets persisted once a request has been split.
//! A run makes two attested calls through an explicitly passed
//! [`ProofClient`]:
//!
//! 1. the stored request itself, with the stored variables substituted into
//!    the URL and the private parameters only;
//! 2. a text-generation request built by a [`TextGenerationClient`] from the
//!    stored prompt and the proof of the first call.
//!
//! The resulting [`SessionRecord`] holds both proofs and no private values.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::classifier::structured_body;
use crate::errors::CurlError;
use crate::headless::{prepare_request, PreparedRequest};
use crate::parser::{extract_body, extract_headers};
use crate::request::{HeaderMap, ParamSet, PrivateParamKeys, Variables};
use crate::substitution::{substitute, substitute_text};

/// A split request as kept by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRequest {
    pub name: String,
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub public: ParamSet,
    #[serde(default)]
    pub private: ParamSet,
    #[serde(default)]
    pub variables: Variables,
    /// Instruction for the text-generation step, applied to the proved data.
    #[serde(default)]
    pub prompt: String,
}

impl StoredRequest {
    /// Builds the stored form of a prepared request.
    ///
    /// Private parameters are stored with their resolved values, exactly as
    /// the descriptor holds them. Use [`StoredRequest::from_command`] to keep
    /// placeholders instead.
    pub fn from_prepared(name: impl Into<String>, prepared: &PreparedRequest, variables: Variables) -> Self {
        Self {
            name: name.into(),
            url: prepared.descriptor.url.clone(),
            method: prepared.descriptor.method.clone(),
            public: prepared.partition.public.clone(),
            private: prepared.partition.private.clone(),
            variables,
            prompt: String::new(),
        }
    }

    /// Builds a stored request whose private parameters keep their `$NAME`
    /// placeholders, so no private value is held at rest. The values are
    /// substituted from `variables` by [`prepare_execution`].
    pub fn from_command(name: impl Into<String>, command_line: &str, variables: Variables) -> Result<Self, CurlError> {
        let prepared = prepare_request(command_line, &variables)?;
        let mut stored = Self::from_prepared(name, &prepared, variables);

        let template = command_line.trim();
        if let Some(private_headers) = stored.private.headers.as_mut() {
            let raw_headers = extract_headers(template);
            for (header, value) in private_headers.iter_mut() {
                if let Some(raw) = raw_headers.get(header) {
                    *value = raw.clone();
                }
            }
        }
        if stored.private.body.is_some() {
            stored.private.body = extract_body(template).map(|raw| structured_body(&raw));
        }
        Ok(stored)
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

/// Options the proof may disclose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicOptions {
    pub method: String,
    pub headers: HeaderMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Options that must be kept out of the proof.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateOptions {
    pub headers: HeaderMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Everything the proof client needs for one outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub url: String,
    pub public: PublicOptions,
    pub private: PrivateOptions,
}

/// What is persisted after a run: public values, private key names, the
/// prompt and both proofs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub method: String,
    pub public: ParamSet,
    pub private_param_keys: PrivateParamKeys,
    pub prompt: String,
    pub api_proof: Value,
    pub generation_proof: Value,
}

/// Handle to the proof-generation service.
///
/// Callers construct a client once and pass it in explicitly; nothing in
/// this crate caches a client globally.
pub trait ProofClient: Send + Sync {
    /// Executes `request` and returns the service's attestation.
    fn prove(&self, request: &ExecutionRequest) -> Result<Value, CurlError>;
}

/// Describes the text-generation service the second call goes to.
pub trait TextGenerationClient: Send + Sync {
    /// Builds the request asking the service to answer `content`.
    fn generation_request(&self, content: &str) -> Result<ExecutionRequest, CurlError>;
}

/// A chat-style `messages` endpoint authenticated by an API key header.
///
/// The key travels in the private options only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesEndpoint {
    pub url: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key_header: String,
    pub api_key: String,
    pub headers: HeaderMap,
}

impl MessagesEndpoint {
    pub fn new(url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: model.into(),
            max_tokens: 1024,
            api_key_header: "x-api-key".to_string(),
            api_key: api_key.into(),
            headers: [("Content-Type".to_string(), "application/json".to_string())].into(),
        }
    }

    /// Adds a public header, e.g. an API version.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl TextGenerationClient for MessagesEndpoint {
    fn generation_request(&self, content: &str) -> Result<ExecutionRequest, CurlError> {
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": content }],
        });
        Ok(ExecutionRequest {
            url: self.url.clone(),
            public: PublicOptions {
                method: "POST".to_string(),
                headers: self.headers.clone(),
                body: Some(serde_json::to_string(&body)?),
            },
            private: PrivateOptions {
                headers: [(self.api_key_header.clone(), self.api_key.clone())].into(),
                body: None,
            },
        })
    }
}

/// The text handed to the text-generation service: the prompt followed by
/// the proof of the API call.
pub fn generation_content(prompt: &str, api_proof: &Value) -> String {
    format!("{}\n\nAPI Response Data: {}", prompt, api_proof)
}

/// Serializes a body value to the JSON text sent on the wire.
fn body_text(body: Option<&Value>) -> Result<Option<String>, CurlError> {
    body.map(serde_json::to_string).transpose().map_err(CurlError::from)
}

/// Resolves `stored` into the options handed to the proof client.
pub fn prepare_execution(stored: &StoredRequest) -> Result<ExecutionRequest, CurlError> {
    let vars = &stored.variables;

    let private_headers = stored
        .private
        .headers
        .as_ref()
        .map(|h| {
            h.iter()
                .map(|(k, v)| (k.clone(), substitute_text(v, vars)))
                .collect::<HeaderMap>()
        })
        .unwrap_or_default();
    let private_body = stored.private.body.as_ref().map(|b| substitute(b, vars));

    let request = ExecutionRequest {
        url: substitute_text(&stored.url, vars),
        public: PublicOptions {
            method: stored.method.clone(),
            headers: stored.public.headers.clone().unwrap_or_default(),
            body: body_text(stored.public.body.as_ref())?,
        },
        private: PrivateOptions {
            headers: private_headers,
            body: body_text(private_body.as_ref())?,
        },
    };
    debug!(
        "Prepared execution of '{}' with {} public and {} private header(s).",
        stored.name,
        request.public.headers.len(),
        request.private.headers.len()
    );
    Ok(request)
}

/// Runs `stored` through `client`, then asks `generator` about the proved
/// data, and builds the session record to persist.
///
/// Fails with [`CurlError::MissingPrompt`] before any call is made when the
/// stored request has no prompt.
pub fn execute(
    client: &dyn ProofClient,
    generator: &dyn TextGenerationClient,
    stored: &StoredRequest,
) -> Result<SessionRecord, CurlError> {
    if stored.prompt.trim().is_empty() {
        return Err(CurlError::MissingPrompt);
    }

    let request = prepare_execution(stored)?;
    info!("Executing '{}' through the proof client.", stored.name);
    let api_proof = client.prove(&request).inspect_err(|_| {
        warn!("API call for '{}' failed.", stored.name);
    })?;

    let generation = generator.generation_request(&generation_content(&stored.prompt, &api_proof))?;
    info!("Running the text-generation step for '{}'.", stored.name);
    let generation_proof = client.prove(&generation).inspect_err(|_| {
        warn!("Text-generation call for '{}' failed.", stored.name);
    })?;

    Ok(SessionRecord {
        method: stored.method.clone(),
        public: stored.public.clone(),
        private_param_keys: PrivateParamKeys::from_params(&stored.private),
        prompt: stored.prompt.clone(),
        api_proof,
        generation_proof,
    })
}
