//! Request profiles for `zkcurl-core`.
//!
//! A profile is a small YAML document bundling a command line with the
//! variable values used to materialise it:
//!
//! ```yaml
//! name: github-user
//! command: "curl https://api.github.com/user -H 'Authorization: Bearer $GITHUB_TOKEN'"
//! variables:
//!   GITHUB_TOKEN: ghp_example
//! ```
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CurlError;
use crate::request::Variables;
use crate::variables::{is_valid_variable_name, scan};

/// A named command line plus the values for its variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestProfile {
    /// Human-readable identifier for the request.
    pub name: String,
    /// The curl invocation, variables unsubstituted.
    pub command: String,
    /// Values for the variables referenced by `command`.
    pub variables: Variables,
}

impl RequestProfile {
    /// Loads and validates a profile from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading request profile from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let profile = Self::from_yaml(&text)
            .with_context(|| format!("Failed to load profile file {}", path.display()))?;
        info!(
            "Loaded profile '{}' with {} variable value(s).",
            profile.name,
            profile.variables.len()
        );
        Ok(profile)
    }

    /// Parses and validates a profile from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, CurlError> {
        let profile: RequestProfile = serde_yml::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Checks that the command is present and every variable name is well formed.
    pub fn validate(&self) -> Result<(), CurlError> {
        let mut errors = Vec::new();

        if self.command.trim().is_empty() {
            errors.push("the `command` field is empty.".to_string());
        }
        for name in self.variables.keys() {
            if !is_valid_variable_name(name) {
                errors.push(format!(
                    "variable '{}' must match [A-Z_][A-Z0-9_]*.",
                    name
                ));
            }
        }

        let referenced = scan(&self.command);
        for name in self.variables.keys() {
            if is_valid_variable_name(name) && !referenced.iter().any(|r| r == name) {
                warn!("Profile '{}': variable '{}' is not referenced by the command.", self.name, name);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CurlError::Profile(errors.join(" ")))
        }
    }
}

/// Overlays `overrides` on `base`; a name present in both takes the override.
pub fn merge_variables(base: Variables, overrides: Variables) -> Variables {
    debug!(
        "merge_variables called with {} base and {} override value(s).",
        base.len(),
        overrides.len()
    );
    let mut merged = base;
    merged.extend(overrides);
    merged
}
