//! # Query Language
//!
//! Parses `fieldQuery` and `labelQuery` expressions into validated
//! criteria handed to the list executor.
//!
//! Pipeline: [`parser::parse`] → [`compiler::compile`] → [`validator::validate`].
//! Every stage is pure; nothing here touches storage.

pub mod compiler;
pub mod criterion;
pub mod errors;
pub mod operator;
pub mod parser;
pub mod validator;

pub use compiler::{canonical_json, compile, parse_number};
pub use criterion::{to_expression, Criterion, CriterionBuilder, Query, QueryType};
pub use errors::{QueryError, QueryResult};
pub use operator::{Applicability, Operator, OperatorInfo, OPERATORS};
pub use parser::{parse, ClauseToken, ClauseValue};
pub use validator::validate;

use tracing::debug;

use crate::schema::FieldTypeLookup;

/// Parse, compile and validate one namespace's expression
pub fn compile_expression(
    raw: &str,
    query_type: QueryType,
    fields: &dyn FieldTypeLookup,
) -> QueryResult<Vec<Criterion>> {
    let tokens = parser::parse(raw, query_type)?;
    compiler::compile_all(&tokens, fields)
}

/// Build a [`Query`] from optional field and label expressions.
///
/// Both namespaces are compiled before conflicts are checked so that a
/// type error is always reported ahead of a duplicate.
pub fn build_query(
    field_expr: Option<&str>,
    label_expr: Option<&str>,
    fields: &dyn FieldTypeLookup,
) -> QueryResult<Query> {
    let result = assemble(field_expr, label_expr, fields);
    if let Err(ref err) = result {
        debug!(kind = err.kind(), error = %err, "rejected query");
    }
    result
}

fn assemble(
    field_expr: Option<&str>,
    label_expr: Option<&str>,
    fields: &dyn FieldTypeLookup,
) -> QueryResult<Query> {
    let field_criteria =
        compile_expression(field_expr.unwrap_or_default(), QueryType::Field, fields)?;
    let label_criteria =
        compile_expression(label_expr.unwrap_or_default(), QueryType::Label, fields)?;

    let query = Query {
        field_criteria,
        label_criteria,
    };
    validate(query.criteria())?;
    Ok(query)
}
