//! # Conflict Validator
//!
//! Rejects criteria sets that apply the same operator to the same key
//! twice within one namespace. Different operators on one key are fine
//! (`gt` + `lt` express a range).

use std::collections::HashSet;

use super::criterion::Criterion;
use super::errors::{QueryError, QueryResult};

/// Validate a compiled criteria set
pub fn validate<'a, I>(criteria: I) -> QueryResult<()>
where
    I: IntoIterator<Item = &'a Criterion>,
{
    let mut seen = HashSet::new();

    for criterion in criteria {
        let group = (criterion.query_type, criterion.key.as_str(), criterion.operator);
        if !seen.insert(group) {
            return Err(QueryError::DuplicateCriterion {
                query_type: criterion.query_type,
                key: criterion.key.clone(),
                operator: criterion.operator,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::criterion::QueryType;
    use crate::query::operator::Operator;

    #[test]
    fn test_identical_clauses_conflict() {
        let criteria = vec![
            Criterion::field("name").eq("db"),
            Criterion::field("name").eq("db"),
        ];
        assert_eq!(
            validate(&criteria),
            Err(QueryError::DuplicateCriterion {
                query_type: QueryType::Field,
                key: "name".to_string(),
                operator: Operator::Equal,
            })
        );
    }

    #[test]
    fn test_same_operator_different_values_conflict() {
        let criteria = vec![
            Criterion::label("env").eq("dev"),
            Criterion::label("env").eq("prod"),
        ];
        assert!(validate(&criteria).is_err());
    }

    #[test]
    fn test_range_on_one_key() {
        let criteria = vec![
            Criterion::field("connections").gt("1"),
            Criterion::field("connections").lt("10"),
        ];
        assert!(validate(&criteria).is_ok());
    }

    #[test]
    fn test_namespaces_are_independent() {
        let criteria = vec![
            Criterion::field("name").eq("db"),
            Criterion::label("name").eq("db"),
        ];
        assert!(validate(&criteria).is_ok());
    }

    #[test]
    fn test_empty_set() {
        assert!(validate(&Vec::<Criterion>::new()).is_ok());
    }
}
