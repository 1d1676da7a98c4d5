//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::logging::init_logging;
use crate::pagination::Cursor;
use crate::query::build_query;
use crate::rest_api::{serve as serve_http, ErrorResponse, RestError};
use crate::schema::ResourceType;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, verbose } => serve(config.as_deref(), verbose),
        Command::ParseQuery {
            resource,
            field_query,
            label_query,
        } => print_outcome(parse_query(
            &resource,
            field_query.as_deref(),
            label_query.as_deref(),
        )),
        Command::DecodeToken { token } => print_outcome(decode_token(&token)),
    }
}

/// Start the HTTP server and block until it stops
pub fn serve(config_path: Option<&Path>, verbose: bool) -> CliResult<()> {
    init_logging(verbose);

    let config = ServerConfig::load_or_default(config_path)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        serve_http(config)
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Compile both expressions against `resource` and render the criteria.
///
/// Rejections come back as the same `{error, description}` body the
/// HTTP API returns.
pub fn parse_query(
    resource: &str,
    field_query: Option<&str>,
    label_query: Option<&str>,
) -> Result<Value, Value> {
    let resource = ResourceType::from_collection(resource)
        .ok_or_else(|| error_body(RestError::CollectionNotFound(resource.to_string())))?;

    let query = build_query(field_query, label_query, &resource.schema())
        .map_err(|e| error_body(e.into()))?;

    serde_json::to_value(&query)
        .map_err(|e| json!({"error": "InternalError", "description": e.to_string()}))
}

/// Decode a pagination token into its timestamp and id
pub fn decode_token(token: &str) -> Result<Value, Value> {
    let cursor = Cursor::decode(token)
        .map_err(|e| json!({"error": e.kind(), "description": e.to_string()}))?;

    Ok(json!({
        "timestamp": cursor.timestamp.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
        "id": cursor.id,
    }))
}

fn error_body(err: RestError) -> Value {
    serde_json::to_value(ErrorResponse::from(&err)).unwrap_or(Value::Null)
}

/// Print the JSON outcome to stdout; a rejection still prints, then fails
fn print_outcome(outcome: Result<Value, Value>) -> CliResult<()> {
    let (body, rejected) = match outcome {
        Ok(body) => (body, None),
        Err(body) => {
            let kind = body["error"].as_str().unwrap_or("Rejected").to_string();
            (body, Some(kind))
        }
    };

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &body)?;
    writeln!(stdout)?;

    match rejected {
        Some(kind) => Err(CliError::rejected(kind)),
        None => Ok(()),
    }
}
