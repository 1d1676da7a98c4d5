//! # Criteria
//!
//! Compiled predicates and the builder used to assemble them in code.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::operator::Operator;
use super::parser::{CLAUSE_SEPARATOR, VALUE_SEPARATOR};

/// Namespace a criterion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    /// Declared resource attributes
    Field,
    /// Free-form key/value annotations
    Label,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Field => "field",
            QueryType::Label => "label",
        }
    }

    /// Query-string parameter carrying this namespace's expression
    pub fn param_name(&self) -> &'static str {
        match self {
            QueryType::Field => "fieldQuery",
            QueryType::Label => "labelQuery",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled, validated predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub key: String,
    pub operator: Operator,
    /// Never empty; more than one entry only for multi-value operators
    pub values: Vec<String>,
    pub query_type: QueryType,
}

impl Criterion {
    /// Start a field criterion for `key`
    pub fn field(key: impl Into<String>) -> CriterionBuilder {
        CriterionBuilder {
            key: key.into(),
            query_type: QueryType::Field,
        }
    }

    /// Start a label criterion for `key`
    pub fn label(key: impl Into<String>) -> CriterionBuilder {
        CriterionBuilder {
            key: key.into(),
            query_type: QueryType::Label,
        }
    }

    /// Render back to clause syntax (`key op value` / `key op [a||b]`)
    pub fn to_clause(&self) -> String {
        let rhs = if self.operator.multi_value_allowed() {
            format!("[{}]", self.values.join(VALUE_SEPARATOR))
        } else {
            self.values.join(VALUE_SEPARATOR)
        };
        format!("{} {} {}", self.key, self.operator, rhs)
    }

    /// First operand. Single-value operators carry exactly one.
    pub fn value(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or_default()
    }
}

/// Builder for criteria, keeping test fixtures type-checked
#[derive(Debug, Clone)]
pub struct CriterionBuilder {
    key: String,
    query_type: QueryType,
}

impl CriterionBuilder {
    /// Build with an explicit operator and operand list
    pub fn op<I, S>(self, operator: Operator, values: I) -> Criterion
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Criterion {
            key: self.key,
            operator,
            values: values.into_iter().map(Into::into).collect(),
            query_type: self.query_type,
        }
    }

    pub fn eq(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::Equal, [value])
    }

    pub fn ne(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::NotEqual, [value])
    }

    pub fn is_in<I, S>(self, values: I) -> Criterion
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.op(Operator::In, values)
    }

    pub fn not_in<I, S>(self, values: I) -> Criterion
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.op(Operator::NotIn, values)
    }

    pub fn gt(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::GreaterThan, [value])
    }

    pub fn gte(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::GreaterThanOrEqual, [value])
    }

    pub fn lt(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::LessThan, [value])
    }

    pub fn lte(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::LessThanOrEqual, [value])
    }

    pub fn eq_or_nil(self, value: impl Into<String>) -> Criterion {
        self.op(Operator::EqualOrNil, [value])
    }
}

/// Join criteria into one query-string expression
pub fn to_expression(criteria: &[Criterion]) -> String {
    criteria
        .iter()
        .map(Criterion::to_clause)
        .collect::<Vec<_>>()
        .join(&CLAUSE_SEPARATOR.to_string())
}

/// Validated criteria for both namespaces
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    pub field_criteria: Vec<Criterion>,
    pub label_criteria: Vec<Criterion>,
}

impl Query {
    /// True when nothing filters the result set
    pub fn is_match_all(&self) -> bool {
        self.field_criteria.is_empty() && self.label_criteria.is_empty()
    }

    /// All criteria, field namespace first
    pub fn criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.field_criteria.iter().chain(self.label_criteria.iter())
    }
}
