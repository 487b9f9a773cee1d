// zkcurl/src/lib.rs
//! # zkcurl CLI Application
//!
//! Command-line front end for `zkcurl-core`: reads a curl command line from an
//! argument, a file, a request profile or stdin, and reports the parsed
//! request with its public/private split.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
