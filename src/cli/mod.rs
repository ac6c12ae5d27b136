//! CLI subcommand implementations for the sitemapper binary.

pub mod audit_cmd;
pub mod cache_cmd;
pub mod discover_cmd;
pub mod fetch_cmd;
pub mod generate_cmd;
pub mod output;
