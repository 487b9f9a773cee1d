// zkcurl/src/main.rs
//! zkcurl entry point.

use std::process::ExitCode;

use clap::Parser;

use zkcurl::cli::Cli;
use zkcurl::commands::{self, error_msg};
use zkcurl::logger;
use zkcurl::ui::theme::{build_theme_map, ThemeStyle};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_for(cli.quiet, cli.debug));

    let theme_map = match build_theme_map(cli.theme.as_ref()) {
        Ok(map) => map,
        Err(e) => {
            let fallback = ThemeStyle::default_theme_map();
            error_msg(format!("Failed to load theme: {:#}", e), &fallback);
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&cli.command, &theme_map) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme_map);
            ExitCode::FAILURE
        }
    }
}
