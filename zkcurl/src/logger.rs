//! Logging setup for the zkcurl CLI.
//!
//! `env_logger` writes to stderr so stdout only ever carries command output.
//! `RUST_LOG` is honoured unless an explicit level is passed in.

use log::LevelFilter;

/// Picks the level implied by the global flags; `None` defers to `RUST_LOG`.
pub fn level_for(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

/// Initialises the global logger. Safe to call more than once.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);
    let _ = builder.try_init();
}
