//! Terminal presentation helpers: theme, message formatting and partition tables.

pub mod output_format;
pub mod partition_table;
pub mod theme;
