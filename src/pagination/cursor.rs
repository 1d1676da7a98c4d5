//! # Pagination Codec
//!
//! A cursor is the `(created_at, id)` position of the last item of a
//! page. Clients receive it as an opaque token:
//! `base64("<RFC3339 timestamp>_<id>")`. Tokens are self-describing and
//! never stored server-side.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::errors::{PageError, PageResult};

/// Separates timestamp and id in the token payload. Ids must not contain it.
pub const SEPARATOR: char = '_';

/// Position in the `(timestamp, id)` ordering of a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Cursor {
    pub timestamp: DateTime<Utc>,
    pub id: String,
}

impl Cursor {
    pub fn new(timestamp: DateTime<Utc>, id: impl Into<String>) -> Self {
        Self {
            timestamp,
            id: id.into(),
        }
    }

    /// Encode into an opaque token
    pub fn encode(&self) -> String {
        let timestamp = self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        STANDARD.encode(format!("{}{}{}", timestamp, SEPARATOR, self.id))
    }

    /// Decode and validate a client-supplied token.
    ///
    /// Whether the position still exists is for the list executor to say.
    pub fn decode(token: &str) -> PageResult<Cursor> {
        let bytes = STANDARD
            .decode(token)
            .map_err(|e| PageError::InvalidToken(format!("not base64: {}", e)))?;
        let payload = String::from_utf8(bytes)
            .map_err(|_| PageError::InvalidToken("payload is not UTF-8".to_string()))?;

        let (timestamp, id) = payload
            .rsplit_once(SEPARATOR)
            .ok_or_else(|| PageError::InvalidToken("missing separator".to_string()))?;

        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .map_err(|e| PageError::InvalidToken(format!("bad timestamp: {}", e)))?
            .with_timezone(&Utc);

        if id.is_empty() {
            return Err(PageError::InvalidToken("missing id".to_string()));
        }

        Ok(Cursor::new(timestamp, id))
    }
}
