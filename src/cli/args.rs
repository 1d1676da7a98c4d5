//! CLI argument definitions using clap
//!
//! Commands:
//! - svcreg serve [--config <path>] [--verbose]
//! - svcreg parse-query --resource <collection> [--field-query <expr>] [--label-query <expr>]
//! - svcreg decode-token <token>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// svcreg - service registry with filtered, cursor-paged listings
#[derive(Parser, Debug)]
#[command(name = "svcreg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Debug-level logging for this crate
        #[arg(long, short)]
        verbose: bool,
    },

    /// Compile filter expressions and print the resulting criteria
    ParseQuery {
        /// Collection the field query is checked against
        #[arg(long)]
        resource: String,

        #[arg(long)]
        field_query: Option<String>,

        #[arg(long)]
        label_query: Option<String>,
    },

    /// Decode a pagination token
    DecodeToken {
        token: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["svcreg", "serve", "--config", "svcreg.json", "-v"]).unwrap();
        match cli.command {
            Command::Serve { config, verbose } => {
                assert_eq!(config, Some(PathBuf::from("svcreg.json")));
                assert!(verbose);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_query_args() {
        let cli = Cli::try_parse_from([
            "svcreg",
            "parse-query",
            "--resource",
            "platforms",
            "--field-query",
            "name = cf",
        ])
        .unwrap();
        match cli.command {
            Command::ParseQuery {
                resource,
                field_query,
                label_query,
            } => {
                assert_eq!(resource, "platforms");
                assert_eq!(field_query.as_deref(), Some("name = cf"));
                assert_eq!(label_query, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_decode_token_requires_token() {
        assert!(Cli::try_parse_from(["svcreg", "decode-token"]).is_err());
    }
}
