//! CLI module for svcreg
//!
//! Provides command-line interface for:
//! - serve: run the HTTP registry
//! - parse-query: offline check of filter expressions
//! - decode-token: inspect a pagination token

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{decode_token, parse_query, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
