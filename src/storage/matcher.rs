//! Criterion evaluation against stored objects
//!
//! All criteria must match (AND semantics). Absent and `null` fields are
//! equivalent and only ever match `eqornil`.

use std::cmp::Ordering;

use serde_json::Value;

use super::object::StoredObject;
use crate::query::{parse_number, Criterion, Operator, Query, QueryType};

/// Evaluates compiled criteria against stored objects
pub struct CriteriaMatcher;

impl CriteriaMatcher {
    /// Checks if an object matches every criterion of the query
    pub fn matches(object: &StoredObject, query: &Query) -> bool {
        query
            .criteria()
            .all(|criterion| Self::matches_criterion(object, criterion))
    }

    pub fn matches_criterion(object: &StoredObject, criterion: &Criterion) -> bool {
        match criterion.query_type {
            QueryType::Field => Self::field_matches(object.field(&criterion.key), criterion),
            QueryType::Label => match object.label(&criterion.key) {
                Some(values) => Self::label_matches(values, criterion),
                // Unknown label keys match nothing
                None => false,
            },
        }
    }

    fn field_matches(actual: Option<&Value>, criterion: &Criterion) -> bool {
        let actual = match actual {
            Some(v) => v,
            None => return criterion.operator == Operator::EqualOrNil,
        };

        let any_equal = || criterion.values.iter().any(|v| value_equals(actual, v));

        match criterion.operator {
            Operator::Equal | Operator::EqualOrNil | Operator::In => any_equal(),
            Operator::NotEqual | Operator::NotIn => !any_equal(),
            Operator::GreaterThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThan
            | Operator::LessThanOrEqual => {
                numeric_cmp(numeric_value(actual), criterion.value(), criterion.operator)
            }
        }
    }

    fn label_matches(labels: &[String], criterion: &Criterion) -> bool {
        let any_equal = || {
            labels
                .iter()
                .any(|label| criterion.values.iter().any(|v| v == label))
        };

        match criterion.operator {
            Operator::Equal | Operator::EqualOrNil | Operator::In => any_equal(),
            Operator::NotEqual | Operator::NotIn => !any_equal(),
            Operator::GreaterThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThan
            | Operator::LessThanOrEqual => labels.iter().any(|label| {
                numeric_cmp(parse_number(label), criterion.value(), criterion.operator)
            }),
        }
    }
}

/// Textual rendering used for equality. Objects and arrays serialize
/// with sorted keys, matching canonicalized operands.
pub fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

fn value_equals(actual: &Value, operand: &str) -> bool {
    match actual {
        Value::Number(n) => match (n.as_f64(), parse_number(operand)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        other => render(other).as_deref() == Some(operand),
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn numeric_cmp(actual: Option<f64>, operand: &str, operator: Operator) -> bool {
    let ordering = match (actual, parse_number(operand)) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => None,
    };

    match (ordering, operator) {
        (Some(Ordering::Greater), Operator::GreaterThan) => true,
        (Some(Ordering::Greater | Ordering::Equal), Operator::GreaterThanOrEqual) => true,
        (Some(Ordering::Less), Operator::LessThan) => true,
        (Some(Ordering::Less | Ordering::Equal), Operator::LessThanOrEqual) => true,
        _ => false,
    }
}
