//! `zkcurl substitute`: resolve variables inside a stored JSON document.

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;
use std::io::{self, Write};

use zkcurl_core::{substitute, Variables};

use crate::cli::SubstituteCommand;
use crate::utils::input::{read_stdin, resolve_variables};

pub fn run_substitute(cmd: &SubstituteCommand) -> Result<()> {
    let text = match &cmd.input_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => read_stdin()?,
    };
    let document: Value = serde_json::from_str(&text).context("Input is not a valid JSON document")?;

    // Only names referenced somewhere in the document are pulled from the environment.
    let vars = resolve_variables(&text, Variables::new(), &cmd.variables)?;
    info!("Substituting {} variable value(s) into the document.", vars.len());

    let resolved = substitute(&document, &vars);
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &resolved).context("Failed to write JSON output")?;
    writeln!(stdout)?;
    Ok(())
}
