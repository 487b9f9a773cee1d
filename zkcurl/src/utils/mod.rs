//! Input collection helpers for the CLI commands.

pub mod input;
