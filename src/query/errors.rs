//! # Query Errors
//!
//! Client-input failures raised while parsing and compiling
//! `fieldQuery` / `labelQuery` expressions.

use thiserror::Error;

use super::criterion::QueryType;
use super::operator::Operator;

/// Result type for query parsing and compilation
pub type QueryResult<T> = Result<T, QueryError>;

/// Query language errors. All of them are client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Clause does not match `key<SP>operator<SP>value`
    #[error("malformed clause '{clause}': {reason}")]
    MalformedClause { clause: String, reason: String },

    /// Operator token not in the operator table
    #[error("unsupported operator '{0}'")]
    UnknownOperator(String),

    /// Operator used in a namespace it does not apply to
    #[error("operator '{operator}' is not allowed in {query_type} queries")]
    OperatorNotAllowed {
        operator: Operator,
        query_type: QueryType,
    },

    /// Numeric operator with a non-numeric field or operand
    #[error("operator '{operator}' requires numeric operands: {detail}")]
    NonNumericOperand { operator: Operator, detail: String },

    /// Bracketed list given to a single-value operator
    #[error("operator '{operator}' accepts a single value, got {count}")]
    MultiValueNotAllowed { operator: Operator, count: usize },

    /// Field query key not declared for the resource
    #[error("unsupported field query key '{0}'")]
    UnknownField(String),

    /// Same (namespace, key, operator) given twice
    #[error("duplicate {query_type} query criterion '{key} {operator}'")]
    DuplicateCriterion {
        query_type: QueryType,
        key: String,
        operator: Operator,
    },
}

impl QueryError {
    pub(crate) fn malformed(clause: &str, reason: impl Into<String>) -> Self {
        QueryError::MalformedClause {
            clause: clause.to_string(),
            reason: reason.into(),
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::MalformedClause { .. } => "MalformedClause",
            QueryError::UnknownOperator(_) => "UnknownOperator",
            QueryError::OperatorNotAllowed { .. } => "OperatorNotAllowed",
            QueryError::NonNumericOperand { .. } => "NonNumericOperand",
            QueryError::MultiValueNotAllowed { .. } => "MultiValueNotAllowed",
            QueryError::UnknownField(_) => "UnknownField",
            QueryError::DuplicateCriterion { .. } => "DuplicateCriterion",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(
            QueryError::malformed("a=b", "missing space").kind(),
            "MalformedClause"
        );
        assert_eq!(
            QueryError::UnknownOperator("@@".to_string()).kind(),
            "UnknownOperator"
        );
        assert_eq!(QueryError::UnknownField("x".to_string()).kind(), "UnknownField");
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = QueryError::OperatorNotAllowed {
            operator: Operator::EqualOrNil,
            query_type: QueryType::Label,
        };
        assert_eq!(
            err.to_string(),
            "operator 'eqornil' is not allowed in label queries"
        );
    }
}
