//! Command implementations for the zkcurl CLI.

pub mod request;
pub mod substitute;

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io;

use crate::cli::Commands;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Dispatches the parsed subcommand.
pub fn run(command: &Commands, theme_map: &ThemeMap) -> Result<()> {
    match command {
        Commands::Scan(cmd) => request::run_scan(cmd),
        Commands::Parse(cmd) => request::run_parse(cmd),
        Commands::Classify(cmd) => request::run_classify(cmd, theme_map),
        Commands::Substitute(cmd) => substitute::run_substitute(cmd),
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}
