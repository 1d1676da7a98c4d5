//! # Operator Table
//!
//! Static registry of the query operators and their capabilities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::criterion::QueryType;

/// Query operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equals
    #[serde(rename = "=")]
    Equal,

    /// Not equals
    #[serde(rename = "!=")]
    NotEqual,

    /// Value in list
    #[serde(rename = "in")]
    In,

    /// Value not in list
    #[serde(rename = "notin")]
    NotIn,

    /// Greater than
    #[serde(rename = "gt")]
    GreaterThan,

    /// Greater than or equal
    #[serde(rename = "gte")]
    GreaterThanOrEqual,

    /// Less than
    #[serde(rename = "lt")]
    LessThan,

    /// Less than or equal
    #[serde(rename = "lte")]
    LessThanOrEqual,

    /// Equals, or the field is absent/null
    #[serde(rename = "eqornil")]
    EqualOrNil,
}

/// Namespaces an operator may be used in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    FieldOnly,
    LabelOnly,
    Both,
}

impl Applicability {
    pub fn permits(&self, query_type: QueryType) -> bool {
        match self {
            Applicability::Both => true,
            Applicability::FieldOnly => query_type == QueryType::Field,
            Applicability::LabelOnly => query_type == QueryType::Label,
        }
    }
}

/// Capabilities attached to an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub operator: Operator,
    pub token: &'static str,
    pub multi_value_allowed: bool,
    pub numeric_only: bool,
    pub allowed_on: Applicability,
}

const fn entry(
    operator: Operator,
    token: &'static str,
    multi_value_allowed: bool,
    numeric_only: bool,
    allowed_on: Applicability,
) -> OperatorInfo {
    OperatorInfo {
        operator,
        token,
        multi_value_allowed,
        numeric_only,
        allowed_on,
    }
}

/// The operator table. Order matches the `Operator` declaration.
pub static OPERATORS: [OperatorInfo; 9] = [
    entry(Operator::Equal, "=", false, false, Applicability::Both),
    entry(Operator::NotEqual, "!=", false, false, Applicability::Both),
    entry(Operator::In, "in", true, false, Applicability::Both),
    entry(Operator::NotIn, "notin", true, false, Applicability::Both),
    entry(Operator::GreaterThan, "gt", false, true, Applicability::Both),
    entry(Operator::GreaterThanOrEqual, "gte", false, true, Applicability::Both),
    entry(Operator::LessThan, "lt", false, true, Applicability::Both),
    entry(Operator::LessThanOrEqual, "lte", false, true, Applicability::Both),
    entry(Operator::EqualOrNil, "eqornil", false, false, Applicability::FieldOnly),
];

impl Operator {
    /// Look up an operator by its query token
    pub fn from_token(token: &str) -> Option<Operator> {
        OPERATORS
            .iter()
            .find(|info| info.token == token)
            .map(|info| info.operator)
    }

    /// Capabilities of this operator
    pub fn info(&self) -> &'static OperatorInfo {
        &OPERATORS[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.info().token
    }

    pub fn multi_value_allowed(&self) -> bool {
        self.info().multi_value_allowed
    }

    pub fn numeric_only(&self) -> bool {
        self.info().numeric_only
    }

    pub fn allowed_on(&self) -> Applicability {
        self.info().allowed_on
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `token` begins with a symbolic operator but is not one,
/// e.g. `=value` where the space after `=` is missing.
pub(crate) fn is_glued_symbol(token: &str) -> bool {
    token.len() > 1 && (token.starts_with("!=") || token.starts_with('='))
}

/// True when `key` ends with a symbolic operator, e.g. `name=`.
pub(crate) fn ends_with_symbol(key: &str) -> bool {
    key.ends_with('=')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_declaration_order() {
        for (idx, info) in OPERATORS.iter().enumerate() {
            assert_eq!(info.operator as usize, idx);
            assert_eq!(Operator::from_token(info.token), Some(info.operator));
        }
    }

    #[test]
    fn test_capabilities() {
        assert!(Operator::In.multi_value_allowed());
        assert!(Operator::NotIn.multi_value_allowed());
        assert!(!Operator::Equal.multi_value_allowed());

        assert!(Operator::GreaterThanOrEqual.numeric_only());
        assert!(!Operator::EqualOrNil.numeric_only());

        assert!(Operator::EqualOrNil.allowed_on().permits(QueryType::Field));
        assert!(!Operator::EqualOrNil.allowed_on().permits(QueryType::Label));
        assert!(Operator::LessThan.allowed_on().permits(QueryType::Label));
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(Operator::from_token("@@"), None);
        assert_eq!(Operator::from_token("<"), None);
        assert_eq!(Operator::from_token("IN"), None);
    }

    #[test]
    fn test_glued_symbols() {
        assert!(is_glued_symbol("=value"));
        assert!(is_glued_symbol("!=value"));
        assert!(!is_glued_symbol("="));
        assert!(!is_glued_symbol("in"));
        assert!(ends_with_symbol("name="));
        assert!(ends_with_symbol("name!="));
        assert!(!ends_with_symbol("name"));
    }
}
