//! This file defines the command-line interface (CLI) for the zkcurl application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "zkcurl",
    version = env!("CARGO_PKG_VERSION"),
    about = "Split a curl command line into public and private request parameters",
    long_about = "zkcurl parses a curl command line, substitutes $VARIABLES into it and reports which headers and body fields are public and which are private. A field is private when its source text references a variable; private values are always masked in the output.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `zkcurl` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lists the variables referenced by a command line.
    #[command(about = "List the $VARIABLES referenced by a curl command line.")]
    Scan(ScanCommand),

    /// Parses a command line into a request descriptor.
    #[command(about = "Parse a curl command line into a request descriptor (JSON).")]
    Parse(ParseCommand),

    /// Splits a command line into public and private parameters.
    #[command(about = "Split a curl command line into public and private parameters.")]
    Classify(ClassifyCommand),

    /// Substitutes variables into a JSON document.
    #[command(about = "Substitute $VARIABLES into every string of a JSON document.")]
    Substitute(SubstituteCommand),
}

/// Where the command line is read from. Stdin is used when none is given.
#[derive(Args, Debug, Default)]
#[group(required = false, multiple = false)]
pub struct InputArgs {
    /// The curl command line, as a single argument.
    #[arg(value_name = "COMMAND", help = "The curl command line (reads stdin if omitted).")]
    pub command: Option<String>,

    /// Path to a file containing the command line.
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read the command line from a file.")]
    pub input_file: Option<PathBuf>,

    /// Path to a YAML request profile.
    #[arg(long = "profile", short = 'p', value_name = "FILE", help = "Load the command line and variable values from a YAML request profile.")]
    pub profile: Option<PathBuf>,
}

/// Where variable values come from.
#[derive(Args, Debug, Default)]
pub struct VariableArgs {
    /// Variable value, repeatable.
    #[arg(long = "var", short = 'v', value_name = "NAME=VALUE", value_parser = parse_key_val, help = "Set a variable value (repeatable).")]
    pub vars: Vec<(String, String)>,

    /// Dotenv file with variable values.
    #[arg(long = "env-file", value_name = "FILE", help = "Read variable values from a dotenv file.")]
    pub env_file: Option<PathBuf>,

    /// Fill unresolved variables from the process environment.
    #[arg(long = "from-env", help = "Resolve variables that are still missing from the process environment.")]
    pub from_env: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the names as a JSON array.
    #[arg(long = "json", help = "Print the variable names as a JSON array.")]
    pub json: bool,
}

/// Arguments for the `parse` command.
#[derive(Parser, Debug)]
pub struct ParseCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub variables: VariableArgs,
}

/// Arguments for the `classify` command.
#[derive(Parser, Debug)]
pub struct ClassifyCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub variables: VariableArgs,

    /// Print the result as JSON.
    #[arg(long = "json", help = "Print public values and masked private parameters as JSON.")]
    pub json: bool,

    /// Fail when a referenced variable has no value.
    #[arg(long = "strict", help = "Exit with an error if any referenced variable has no value.")]
    pub strict: bool,
}

/// Arguments for the `substitute` command.
#[derive(Parser, Debug)]
pub struct SubstituteCommand {
    /// Path to a JSON document (reads stdin if omitted).
    #[arg(long = "input", short = 'i', value_name = "FILE", help = "Read the JSON document from a file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub variables: VariableArgs,
}

/// Parses a `NAME=VALUE` pair. The value may itself contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid NAME=VALUE pair: no '=' found in '{}'", s))?;
    if name.is_empty() {
        return Err("invalid NAME=VALUE pair: empty name".to_string());
    }
    Ok((name.to_string(), value.to_string()))
}
