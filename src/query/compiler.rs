//! # Criterion Compiler
//!
//! Turns clause tokens into typed criteria, enforcing the operator
//! table and the declared field types of the target resource.

use serde_json::Value;

use super::criterion::{Criterion, QueryType};
use super::errors::{QueryError, QueryResult};
use super::operator::Operator;
use super::parser::{ClauseToken, ClauseValue};
use crate::schema::{FieldType, FieldTypeLookup};

/// Compile one clause token
pub fn compile(token: &ClauseToken, fields: &dyn FieldTypeLookup) -> QueryResult<Criterion> {
    let operator = token.operator;

    if !operator.allowed_on().permits(token.query_type) {
        return Err(QueryError::OperatorNotAllowed {
            operator,
            query_type: token.query_type,
        });
    }

    // Label keys are free-form and untyped
    let field_type = match token.query_type {
        QueryType::Field => match fields.field_type(&token.key) {
            FieldType::Unknown => return Err(QueryError::UnknownField(token.key.clone())),
            known => Some(known),
        },
        QueryType::Label => None,
    };

    let values = operand_values(token, field_type)?;

    if operator.numeric_only() {
        if let Some(field_type) = field_type {
            if field_type != FieldType::Number {
                return Err(QueryError::NonNumericOperand {
                    operator,
                    detail: format!("field '{}' is of type {}", token.key, field_type),
                });
            }
        }
        if let Some(bad) = values.iter().find(|v| parse_number(v).is_none()) {
            return Err(QueryError::NonNumericOperand {
                operator,
                detail: format!("'{}' is not a number", bad),
            });
        }
    }

    Ok(Criterion {
        key: token.key.clone(),
        operator,
        values: values.iter().map(|v| canonical_json(v)).collect(),
        query_type: token.query_type,
    })
}

/// Compile every token of one namespace
pub fn compile_all(
    tokens: &[ClauseToken],
    fields: &dyn FieldTypeLookup,
) -> QueryResult<Vec<Criterion>> {
    tokens.iter().map(|token| compile(token, fields)).collect()
}

fn operand_values(token: &ClauseToken, field_type: Option<FieldType>) -> QueryResult<Vec<String>> {
    let operator = token.operator;
    match &token.value {
        ClauseValue::Scalar(value) => Ok(vec![value.clone()]),
        ClauseValue::List { items, .. } if operator.multi_value_allowed() => Ok(items.clone()),
        ClauseValue::List { items, .. } if items.len() > 1 => {
            Err(QueryError::MultiValueNotAllowed {
                operator,
                count: items.len(),
            })
        }
        ClauseValue::List { items, text }
            if is_json_array_operand(operator, field_type, items, text) =>
        {
            Ok(vec![text.clone()])
        }
        ClauseValue::List { items, .. } => Ok(items.clone()),
    }
}

/// A bracketed single value is a one-element list unless it is a JSON
/// array meant as the operand itself: compared against a JSON field, or
/// holding an item that is not a JSON value on its own (`["x", "y"]`).
fn is_json_array_operand(
    operator: Operator,
    field_type: Option<FieldType>,
    items: &[String],
    text: &str,
) -> bool {
    if operator.numeric_only() {
        return false;
    }
    if !matches!(serde_json::from_str::<Value>(text), Ok(Value::Array(_))) {
        return false;
    }
    field_type == Some(FieldType::Json)
        || items
            .iter()
            .any(|item| serde_json::from_str::<Value>(item).is_err())
}

/// Parse a numeric operand. Non-finite values are rejected.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical form of JSON object/array operands: compact, keys sorted.
/// Anything else is returned unchanged.
pub fn canonical_json(value: &str) -> String {
    let trimmed = value.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return value.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(parsed @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string(&parsed).unwrap_or_else(|_| value.to_string())
        }
        _ => value.to_string(),
    }
}
