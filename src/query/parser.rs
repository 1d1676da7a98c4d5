//! # Clause Parser
//!
//! Splits a raw `fieldQuery` / `labelQuery` value into clause tokens.
//!
//! Grammar:
//!
//! ```text
//! expression := clause ( "|" clause )*
//! clause     := key " " operator " " value
//! value      := scalar | "[" scalar ( "||" scalar )* "]"
//! ```
//!
//! Exactly one space separates the operator from each operand.

use super::criterion::QueryType;
use super::errors::{QueryError, QueryResult};
use super::operator::{ends_with_symbol, is_glued_symbol, Operator};

/// Separator between clauses
pub const CLAUSE_SEPARATOR: char = '|';

/// Separator between values of a bracketed list
pub const VALUE_SEPARATOR: &str = "||";

/// Right-hand side of a clause as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseValue {
    /// Bare token, e.g. `db`
    Scalar(String),
    /// Bracketed list, e.g. `[a||b]`. Always has at least one element.
    List {
        items: Vec<String>,
        /// The bracketed text verbatim, used when it turns out to be JSON
        text: String,
    },
}

impl ClauseValue {
    pub fn len(&self) -> usize {
        match self {
            ClauseValue::Scalar(_) => 1,
            ClauseValue::List { items, .. } => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One parsed but not yet compiled clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseToken {
    pub key: String,
    pub operator: Operator,
    pub value: ClauseValue,
    pub query_type: QueryType,
}

/// Parse an expression into clause tokens. Empty input means "match all".
pub fn parse(raw: &str, query_type: QueryType) -> QueryResult<Vec<ClauseToken>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    split_clauses(raw)?
        .into_iter()
        .map(|clause| parse_clause(clause, query_type))
        .collect()
}

/// Split on top-level `|`. Separators inside brackets, braces, or JSON
/// strings belong to the value. Brackets and braces must balance.
fn split_clauses(raw: &str) -> QueryResult<Vec<&str>> {
    let mut clauses = Vec::new();
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' if depth == 0 => {
                return Err(QueryError::malformed(
                    &raw[start..],
                    format!("unmatched '{}'", c),
                ));
            }
            ']' | '}' => depth -= 1,
            CLAUSE_SEPARATOR if depth == 0 => {
                clauses.push(&raw[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 || in_string {
        return Err(QueryError::malformed(&raw[start..], "unbalanced brackets"));
    }
    clauses.push(&raw[start..]);

    Ok(clauses)
}

fn parse_clause(clause: &str, query_type: QueryType) -> QueryResult<ClauseToken> {
    const SPACING: &str = "operator must be separated from its operands by a single space";

    if clause.is_empty() {
        return Err(QueryError::malformed(clause, "empty clause"));
    }

    let (key, rest) = clause
        .split_once(' ')
        .ok_or_else(|| QueryError::malformed(clause, SPACING))?;

    if key.is_empty() {
        return Err(QueryError::malformed(clause, "missing key"));
    }
    if ends_with_symbol(key) {
        return Err(QueryError::malformed(clause, SPACING));
    }

    let (op_token, value) = rest
        .split_once(' ')
        .ok_or_else(|| QueryError::malformed(clause, SPACING))?;

    if op_token.is_empty() || value.starts_with(' ') {
        return Err(QueryError::malformed(clause, SPACING));
    }

    let operator = match Operator::from_token(op_token) {
        Some(op) => op,
        None if is_glued_symbol(op_token) => {
            return Err(QueryError::malformed(clause, SPACING));
        }
        None => return Err(QueryError::UnknownOperator(op_token.to_string())),
    };

    if value.is_empty() {
        return Err(QueryError::malformed(clause, "missing value"));
    }

    Ok(ClauseToken {
        key: key.to_string(),
        operator,
        value: parse_value(clause, value)?,
        query_type,
    })
}

fn parse_value(clause: &str, value: &str) -> QueryResult<ClauseValue> {
    let inner = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => inner,
        None => return Ok(ClauseValue::Scalar(value.to_string())),
    };

    if inner.is_empty() {
        return Err(QueryError::malformed(clause, "empty value list"));
    }

    let items: Vec<String> = inner.split(VALUE_SEPARATOR).map(str::to_string).collect();
    if items.iter().any(String::is_empty) {
        return Err(QueryError::malformed(clause, "empty value in list"));
    }

    Ok(ClauseValue::List {
        items,
        text: value.to_string(),
    })
}
