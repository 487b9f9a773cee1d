//! Reading command lines and resolving variable values for the CLI.
//!
//! Variable values are layered, later sources winning: request profile,
//! dotenv file, then `--var` flags. `--from-env` only fills names that are
//! still unresolved afterwards.

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Read};
use std::path::Path;

use zkcurl_core::{merge_variables, RequestProfile, Variables};

use crate::cli::{InputArgs, VariableArgs};

/// A command line plus the values its source provided.
#[derive(Debug, Clone, Default)]
pub struct RequestSource {
    pub command: String,
    pub profile_variables: Variables,
}

/// Reads the command line from the positional argument, a file, a profile,
/// or stdin, in that order.
pub fn read_command(args: &InputArgs) -> Result<RequestSource> {
    if let Some(command) = &args.command {
        debug!("Reading command line from argument.");
        return Ok(RequestSource { command: command.trim().to_string(), ..Default::default() });
    }
    if let Some(path) = &args.input_file {
        info!("Reading command line from file: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        return Ok(RequestSource { command: join_continuations(&text), ..Default::default() });
    }
    if let Some(path) = &args.profile {
        let profile = RequestProfile::load_from_file(path)?;
        return Ok(RequestSource {
            command: join_continuations(&profile.command),
            profile_variables: profile.variables,
        });
    }

    info!("Reading command line from stdin...");
    let text = read_stdin()?;
    Ok(RequestSource { command: join_continuations(&text), ..Default::default() })
}

pub fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;
    Ok(text)
}

/// Folds shell line continuations (`\` + newline) so commands copied from
/// documentation parse as a single line.
pub fn join_continuations(text: &str) -> String {
    text.replace("\\\r\n", " ").replace("\\\n", " ").trim().to_string()
}

/// Reads `NAME=VALUE` pairs from a dotenv file without touching the process
/// environment.
pub fn load_env_file(path: &Path) -> Result<Variables> {
    let mut vars = Variables::new();
    let iter = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open env file {}", path.display()))?;
    for item in iter {
        let (name, value) =
            item.with_context(|| format!("Failed to parse env file {}", path.display()))?;
        vars.insert(name, value);
    }
    debug!("Loaded {} value(s) from env file {}.", vars.len(), path.display());
    Ok(vars)
}

/// Resolves the final variable map for `command`.
pub fn resolve_variables(command: &str, base: Variables, args: &VariableArgs) -> Result<Variables> {
    let mut vars = base;
    if let Some(path) = &args.env_file {
        vars = merge_variables(vars, load_env_file(path)?);
    }
    vars = merge_variables(vars, args.vars.iter().cloned().collect());

    if args.from_env {
        for name in zkcurl_core::scan(command) {
            if vars.contains_key(&name) {
                continue;
            }
            if let Ok(value) = std::env::var(&name) {
                debug!("Resolved '{}' from the process environment.", name);
                vars.insert(name, value);
            }
        }
    }
    Ok(vars)
}
